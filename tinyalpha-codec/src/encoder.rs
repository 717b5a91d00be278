//! TAL encoder.

use crate::config::TalConfig;
use crate::container::Container;
use crate::palette::Palette;
use crate::pixel::Pixel;
use crate::raster::{PixelSource, Raster};
use crate::streak::{MAX_STREAK_LEN, Streak, Streaks};
use tinyalpha_core::{MsbBitWriter, Result, TalError};
use tracing::{debug, trace};

/// The four streak streams of an encoded image.
///
/// `chroma` and `count` hold one bit per streak, `color_type` one bit per
/// colored streak. `body` holds the optional length bytes and the color
/// indices. Every field is zero-padded to a whole number of bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakFields {
    /// Colored (1) or transparent (0), per streak.
    pub chroma: Vec<u8>,
    /// Multi-pixel (1) or single-pixel (0), per streak.
    pub count: Vec<u8>,
    /// Favorite (1) or extended (0) index, per colored streak.
    pub color_type: Vec<u8>,
    /// Length bytes and color indices.
    pub body: Vec<u8>,
    /// Number of streak records.
    pub streak_count: u32,
}

/// Bits written so far to each streak stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldBits {
    /// Bits in the chroma field.
    pub chroma: u64,
    /// Bits in the count field.
    pub count: u64,
    /// Bits in the color-type field.
    pub color_type: u64,
    /// Bits in the body.
    pub body: u64,
}

/// Writes streak records into the four streak streams.
///
/// Each [`push`](Self::push) writes one whole record to every stream it
/// touches, so the streams cannot drift apart.
#[derive(Debug)]
pub struct StreakEncoder<'p> {
    palette: &'p Palette,
    chroma: MsbBitWriter,
    count: MsbBitWriter,
    color_type: MsbBitWriter,
    body: MsbBitWriter,
    streak_count: u32,
}

impl<'p> StreakEncoder<'p> {
    /// Create an encoder that indexes colors through `palette`.
    pub fn new(palette: &'p Palette) -> Self {
        Self {
            palette,
            chroma: MsbBitWriter::new(),
            count: MsbBitWriter::new(),
            color_type: MsbBitWriter::new(),
            body: MsbBitWriter::new(),
            streak_count: 0,
        }
    }

    /// The streaks `pixels` splits into.
    pub fn streaks(pixels: &[Pixel]) -> Streaks<'_> {
        Streaks::new(pixels)
    }

    /// Append one streak record.
    ///
    /// # Record layout
    ///
    /// 1. chroma: 1 if colored
    /// 2. count: 1 if longer than one pixel, then the low 8 bits of the
    ///    length go to the body (256 is written as 0)
    /// 3. colored only: color-type 1 for a favorite, then the index goes to
    ///    the body, 4 bits for a favorite, 8 bits otherwise
    ///
    /// A streak whose length is outside 1..=256 or whose color is not in the
    /// palette fails with `CorruptStream` before any stream is written.
    pub fn push(&mut self, streak: Streak) -> Result<()> {
        if !streak.is_valid() {
            return Err(TalError::corrupt_stream(
                self.streak_count as u64,
                format!(
                    "streak length {} is outside 1..={}",
                    streak.length(),
                    MAX_STREAK_LEN
                ),
            ));
        }

        let index = match streak.color() {
            Some(color) => Some(self.palette.lookup(color).ok_or_else(|| {
                TalError::corrupt_stream(
                    self.streak_count as u64,
                    format!("color {} is not in the palette", color),
                )
            })?),
            None => None,
        };

        self.chroma.write_bit(streak.is_colored());

        self.count.write_bit(streak.is_multi());
        if streak.is_multi() {
            self.body.write_uint(u32::from(streak.length()) & 0xFF, 8);
        }

        if let Some(index) = index {
            self.color_type.write_bit(index.is_favorite());
            self.body.write_uint(index.value() as u32, index.width());
        }

        trace!(
            streak = self.streak_count,
            length = streak.length(),
            color = ?streak.color(),
            "streak"
        );
        self.streak_count += 1;
        Ok(())
    }

    /// Append the streaks of a row-major pixel sequence.
    pub fn encode_pixels(&mut self, pixels: &[Pixel]) -> Result<()> {
        for streak in Self::streaks(pixels) {
            self.push(streak)?;
        }
        Ok(())
    }

    /// Number of records written so far.
    pub fn streak_count(&self) -> u32 {
        self.streak_count
    }

    /// Bits written so far to each stream.
    pub fn bit_lengths(&self) -> FieldBits {
        FieldBits {
            chroma: self.chroma.bit_len(),
            count: self.count.bit_len(),
            color_type: self.color_type.bit_len(),
            body: self.body.bit_len(),
        }
    }

    /// Finish and return the byte-aligned streams.
    pub fn finish(self) -> StreakFields {
        StreakFields {
            chroma: self.chroma.into_bytes(),
            count: self.count.into_bytes(),
            color_type: self.color_type.into_bytes(),
            body: self.body.into_bytes(),
            streak_count: self.streak_count,
        }
    }
}

/// TAL encoder: raster in, TAL bytes out.
#[derive(Debug, Clone)]
pub struct TalEncoder {
    config: TalConfig,
}

impl TalEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: TalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The encoder's configuration.
    pub fn config(&self) -> &TalConfig {
        &self.config
    }

    /// Encode a raster into TAL bytes.
    ///
    /// # Algorithm
    ///
    /// 1. Tally colors into a frequency-sorted palette
    /// 2. Split the pixels into streaks in row-major order
    /// 3. Write each streak into the chroma, count, color-type and body streams
    /// 4. Serialize header, palette and streams into the container
    pub fn encode(&self, raster: &Raster) -> Result<Vec<u8>> {
        self.encode_container(raster)?.serialize()
    }

    /// Encode any pixel source into TAL bytes.
    pub fn encode_source<S: PixelSource + ?Sized>(&self, source: &S) -> Result<Vec<u8>> {
        self.encode(&source.to_raster()?)
    }

    /// Build the container for a raster without serializing it.
    pub fn encode_container(&self, raster: &Raster) -> Result<Container> {
        self.config
            .check_dimensions(raster.width(), raster.height())?;

        let palette = Palette::build_with_limit(raster.pixels(), self.config.max_colors)?;

        let mut streaks = StreakEncoder::new(&palette);
        streaks.encode_pixels(raster.pixels())?;
        let bits = streaks.bit_lengths();
        let fields = streaks.finish();

        debug!(
            width = raster.width(),
            height = raster.height(),
            colors = palette.len(),
            streaks = fields.streak_count,
            chroma_bits = bits.chroma,
            color_type_bits = bits.color_type,
            body_bits = bits.body,
            "encoded raster"
        );

        Ok(Container {
            width: raster.width(),
            height: raster.height(),
            palette,
            fields,
        })
    }
}

impl Default for TalEncoder {
    fn default() -> Self {
        Self {
            config: TalConfig::V1,
        }
    }
}
