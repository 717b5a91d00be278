//! Encode command implementation.

use crate::utils::{check_destination, load_rgba, output_path, write_atomic};
use std::path::Path;
use tinyalpha_codec::{TalConfig, TalEncoder};
use tracing::info;

pub fn cmd_encode(
    input: &Path,
    output: Option<&Path>,
    overwrite: bool,
    max_dimension: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let destination = output_path(input, output, "tal");
    check_destination(&destination, overwrite)?;

    let encoder = TalEncoder::new(TalConfig::V1.with_max_dimension(max_dimension))?;
    let image = load_rgba(input)?;
    let bytes = encoder.encode_source(&image)?;
    write_atomic(&destination, &bytes)?;

    let raw = image.as_raw().len();
    info!(
        input = %input.display(),
        output = %destination.display(),
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "encoded"
    );
    println!(
        "{} -> {} ({} bytes, {:.1}x smaller than raw RGBA)",
        input.display(),
        destination.display(),
        bytes.len(),
        raw as f64 / bytes.len() as f64
    );

    Ok(())
}
