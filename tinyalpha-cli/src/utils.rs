//! Utility functions for the CLI.

use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tinyalpha_core::{Result, TalError};
use tracing::debug;

/// Destination for `input`: `explicit` if given, otherwise `input` with its
/// extension replaced by `extension`.
pub fn output_path(input: &Path, explicit: Option<&Path>, extension: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(extension),
    }
}

/// Fail with `FileAlreadyExists` when `path` is taken and overwriting is off.
pub fn check_destination(path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(TalError::file_already_exists(path));
    }
    Ok(())
}

/// Sibling path the output is staged in before the rename.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Write `data` to `path` through a sibling temporary file.
///
/// The destination either keeps its old contents or receives all of `data`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let staging = staging_path(path);
    debug!(path = %staging.display(), bytes = data.len(), "staging output");

    let result = fs::write(&staging, data).and_then(|()| fs::rename(&staging, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

/// Load any image the `image` crate reads as 8-bit RGBA.
pub fn load_rgba(path: &Path) -> std::result::Result<RgbaImage, Box<dyn std::error::Error>> {
    let image = image::open(path).map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
    Ok(image.to_rgba8())
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| format!("Failed to encode PNG: {}", e))?;
    Ok(out.into_inner())
}
