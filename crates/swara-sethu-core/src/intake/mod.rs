mod uploaded_file;
mod validator;

pub use {
    uploaded_file::{FileSource, UploadedFile},
    validator::{check_count, check_size, is_mp3, select_single, validate},
};

/// Largest accepted upload (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Media type accepted without looking at the file name.
pub const MP3_MEDIA_TYPE: &str = "audio/mpeg";

pub(crate) const MP3_EXTENSION: &str = ".mp3";
