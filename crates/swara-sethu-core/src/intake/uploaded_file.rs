use crate::{CoreError, CoreResult};

use std::{
    borrow::Cow,
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

/// Where an uploaded file's bytes come from.
#[derive(Clone)]
pub enum FileSource {
    /// Bytes already held in memory.
    Memory(Vec<u8>),
    /// Bytes read from disk when the file is encoded.
    Disk(PathBuf),
}

impl std::fmt::Debug for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSource::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
            FileSource::Disk(path) => f.debug_tuple("Disk").field(path).finish(),
        }
    }
}

/// A file handed to the upload control.
///
/// Only metadata is inspected during validation; the bytes of a
/// [`FileSource::Disk`] file are read when the payload is encoded.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    media_type: Option<String>,
    size: u64,
    source: FileSource,
}

impl UploadedFile {
    /// Wrap bytes already in memory with their declared media type.
    pub fn from_bytes(name: impl Into<String>, media_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Describe a file on disk.
    ///
    /// The media type is sniffed from the file header since there is no
    /// browser-declared type to rely on. An unrecognised header leaves it
    /// unset, in which case validation falls back to the file name.
    #[instrument]
    pub async fn from_path(path: &Path) -> CoreResult<Self> {
        let metadata = tokio::fs::metadata(path).await?;

        if !metadata.is_file() {
            return Err(CoreError::from(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            )));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let media_type = sniff_media_type(path.to_path_buf()).await;

        debug!(
            file_name = %name,
            size = metadata.len(),
            media_type = ?media_type,
            "File described"
        );

        Ok(Self {
            name,
            media_type,
            size: metadata.len(),
            source: FileSource::Disk(path.to_path_buf()),
        })
    }

    /// File name as supplied, without directories.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared (or sniffed) media type.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Byte source.
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Read the file contents.
    ///
    /// Returns `Cow::Borrowed` for in-memory files (zero-copy) and
    /// `Cow::Owned` for files read from disk.
    pub async fn read_bytes(&self) -> CoreResult<Cow<'_, [u8]>> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            FileSource::Disk(path) => Ok(Cow::Owned(tokio::fs::read(path).await?)),
        }
    }
}

// infer reads only the header, but it is still blocking file IO.
async fn sniff_media_type(path: PathBuf) -> Option<String> {
    tokio::task::spawn_blocking(move || infer::get_from_path(&path))
        .await
        .ok()?
        .ok()?
        .map(|kind| kind.mime_type().to_string())
}
