//! Decode command implementation.

use crate::utils::{check_destination, encode_png, output_path, write_atomic};
use image::RgbaImage;
use std::fs;
use std::path::Path;
use tinyalpha_codec::TalDecoder;
use tracing::info;

pub fn cmd_decode(
    input: &Path,
    output: Option<&Path>,
    overwrite: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let destination = output_path(input, output, "png");
    check_destination(&destination, overwrite)?;

    let data =
        fs::read(input).map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;
    let image: RgbaImage = TalDecoder::default().decode_into(&data)?;
    let png = encode_png(&image)?;
    write_atomic(&destination, &png)?;

    info!(
        input = %input.display(),
        output = %destination.display(),
        width = image.width(),
        height = image.height(),
        "decoded"
    );
    println!(
        "{} -> {} ({}x{})",
        input.display(),
        destination.display(),
        image.width(),
        image.height()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_input_names_the_file() {
        let input = std::env::temp_dir().join(format!("tal-missing-{}.tal", std::process::id()));
        let output = PathBuf::from(format!("{}.png", input.display()));

        let err = cmd_decode(&input, Some(&output), true).unwrap_err();
        assert!(err.to_string().contains(&input.display().to_string()));
        assert!(!output.exists());
    }
}
