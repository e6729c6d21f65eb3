//! Input image handling.
//!
//! - [`sanitize`]: drag-and-drop path normalization
//! - validation of existence and extension before anything is launched
//! - header probing for the size report
//! - default output path derivation

mod sanitize;

pub use sanitize::sanitize_path;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions the converter accepts (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// Input validation failures.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no input image given")]
    Empty,

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    #[error("unsupported image type `{ext}` for {path} (supported: {})", SUPPORTED_EXTENSIONS.join(", "))]
    UnsupportedExtension { path: PathBuf, ext: String },
}

/// Check that `path` names an existing file with a supported extension.
pub fn validate_input(path: &Path) -> Result<(), InputError> {
    if path.as_os_str().is_empty() {
        return Err(InputError::Empty);
    }
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(InputError::NotAFile(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(InputError::UnsupportedExtension {
            path: path.to_path_buf(),
            ext,
        });
    }
    Ok(())
}

/// Read the image dimensions from the file header.
///
/// Only the header is decoded. Failure is not fatal for the caller: the
/// converter may still read formats this build cannot.
pub fn read_dimensions(path: &Path) -> image::ImageResult<(u32, u32)> {
    image::image_dimensions(path)
}

/// Derive the output path: `{dir}/{stem}{suffix}.png`.
pub fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(suffix);
    name.push(".png");
    input.with_file_name(name)
}
