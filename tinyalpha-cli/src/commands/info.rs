//! Info command implementation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tinyalpha_codec::{TalInfo, inspect};

/// JSON serializable summary of a TAL file.
#[derive(Debug, Serialize, Deserialize)]
struct InfoJson {
    file: String,
    version: u8,
    width: u32,
    height: u32,
    file_size: usize,
    ratio: f64,
    palette: Vec<String>,
    favorites: usize,
    streak_count: u32,
    colored_streaks: u32,
    fields: FieldsJson,
}

/// Byte lengths of the streak streams.
#[derive(Debug, Serialize, Deserialize)]
struct FieldsJson {
    chroma: usize,
    count: usize,
    color_type: usize,
    body: usize,
}

impl InfoJson {
    fn from_info(file: &Path, info: &TalInfo) -> Self {
        Self {
            file: file.display().to_string(),
            version: info.version,
            width: info.width,
            height: info.height,
            file_size: info.file_size,
            ratio: info.compression_ratio(),
            palette: info.palette.iter().map(|c| c.to_string()).collect(),
            favorites: info.favorites,
            streak_count: info.streak_count,
            colored_streaks: info.colored_streaks,
            fields: FieldsJson {
                chroma: info.chroma_len,
                count: info.count_len,
                color_type: info.color_type_len,
                body: info.body_len,
            },
        }
    }
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data =
        fs::read(input).map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;
    let info = inspect(&data)?;

    if json {
        let output = InfoJson::from_info(input, &info);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("TAL Information");
    println!("===============");
    println!("File: {}", input.display());
    println!("Version: {}", info.version);
    println!("Dimensions: {}x{}", info.width, info.height);
    println!("Size: {} bytes", info.file_size);
    if info.pixel_count() > 0 {
        println!(
            "Compression ratio: {:.1}x vs raw RGBA",
            info.compression_ratio()
        );
    }

    println!();
    println!("Palette: {} colors ({} favorites)", info.palette.len(), info.favorites);
    for (i, color) in info.palette.iter().enumerate() {
        let marker = if i < info.favorites { '*' } else { ' ' };
        println!("  {:>3}{} {}", i, marker, color);
    }

    println!();
    println!("Streaks: {} ({} colored)", info.streak_count, info.colored_streaks);
    println!("  Chroma field: {} bytes", info.chroma_len);
    println!("  Count field: {} bytes", info.count_len);
    println!("  Color-type field: {} bytes", info.color_type_len);
    println!("  Body: {} bytes", info.body_len);

    Ok(())
}
