use crate::{
    CoreError, CoreResult,
    intake::{MAX_UPLOAD_BYTES, MP3_EXTENSION, MP3_MEDIA_TYPE, UploadedFile},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::debug;

/// Accept exactly one valid MP3 out of a drop or pick gesture.
///
/// Checks run in order: file count, then format, then size. Nothing from a
/// rejected selection is passed on.
#[track_caller]
pub fn select_single(mut files: Vec<UploadedFile>) -> CoreResult<UploadedFile> {
    check_count(files.len())?;

    let Some(file) = files.pop() else {
        return Err(CoreError::NoFileSelected {
            location: ErrorLocation::from(Location::caller()),
        });
    };

    validate(&file)?;

    Ok(file)
}

/// Reject a gesture that carries anything but exactly one file.
///
/// Runs on the count alone, so a selection can be refused before any file
/// is read.
#[track_caller]
pub fn check_count(count: usize) -> CoreResult<()> {
    match count {
        1 => Ok(()),
        0 => Err(CoreError::NoFileSelected {
            location: ErrorLocation::from(Location::caller()),
        }),
        count => Err(CoreError::MultipleFiles {
            count,
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Check format and size of a single file.
#[track_caller]
pub fn validate(file: &UploadedFile) -> CoreResult<()> {
    if !is_mp3(file.name(), file.media_type()) {
        return Err(CoreError::InvalidFormat {
            file_name: file.name().to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    check_size(file.size())?;

    debug!(file_name = %file.name(), size = file.size(), "File accepted");

    Ok(())
}

/// MP3 when the media type is `audio/mpeg` or the name ends in `.mp3`
/// (case-insensitive).
pub fn is_mp3(file_name: &str, media_type: Option<&str>) -> bool {
    media_type.is_some_and(|mime| mime.eq_ignore_ascii_case(MP3_MEDIA_TYPE))
        || file_name.to_ascii_lowercase().ends_with(MP3_EXTENSION)
}

/// Reject anything larger than [`MAX_UPLOAD_BYTES`].
#[track_caller]
pub fn check_size(size: u64) -> CoreResult<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}
