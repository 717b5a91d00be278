//! Header inspection without decoding the streaks.

use crate::container::{Container, VERSION};
use crate::palette::FAVORITE_COUNT;
use crate::pixel::Pixel;
use tinyalpha_core::{MsbBitReader, Result};

/// Summary of a TAL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Format version.
    pub version: u8,
    /// Palette colors, most frequent first.
    pub palette: Vec<Pixel>,
    /// Palette entries addressable with a 4-bit favorite index.
    pub favorites: usize,
    /// Chroma field size in bytes.
    pub chroma_len: usize,
    /// Count field size in bytes.
    pub count_len: usize,
    /// Color-type field size in bytes.
    pub color_type_len: usize,
    /// Body size in bytes.
    pub body_len: usize,
    /// Number of streak records.
    pub streak_count: u32,
    /// Streak records that carry a color.
    pub colored_streaks: u32,
    /// Total file size in bytes.
    pub file_size: usize,
}

impl TalInfo {
    /// Number of pixels in the image.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Raw RGBA size divided by file size.
    pub fn compression_ratio(&self) -> f64 {
        if self.file_size == 0 {
            return 0.0;
        }
        (self.pixel_count() * 4) as f64 / self.file_size as f64
    }
}

/// Parse the header of `data` and count colored streaks from the chroma field.
pub fn inspect(data: &[u8]) -> Result<TalInfo> {
    let container = Container::parse(data)?;
    let fields = &container.fields;

    let mut chroma = MsbBitReader::new(&fields.chroma);
    let mut colored_streaks = 0u32;
    for _ in 0..fields.streak_count {
        if chroma.read_bit()? {
            colored_streaks += 1;
        }
    }

    Ok(TalInfo {
        width: container.width,
        height: container.height,
        version: VERSION,
        favorites: container.palette.len().min(FAVORITE_COUNT),
        palette: container.palette.colors().to_vec(),
        chroma_len: fields.chroma.len(),
        count_len: fields.count.len(),
        color_type_len: fields.color_type.len(),
        body_len: fields.body.len(),
        streak_count: fields.streak_count,
        colored_streaks,
        file_size: data.len(),
    })
}
