//! TAL decoder.
//!
//! The decoder replays the encoder's record layout: for each streak it reads
//! the count flag, the chroma flag and, for a colored streak, the color-type
//! flag, then the length byte and color index from the body. The four streams
//! are consumed independently but one whole record at a time.

use crate::config::TalConfig;
use crate::container::Container;
use crate::encoder::StreakFields;
use crate::palette::{ColorIndex, Palette};
use crate::pixel::Pixel;
use crate::raster::{PixelSink, Raster};
use crate::streak::{MAX_STREAK_LEN, Streak};
use tinyalpha_core::{MsbBitReader, Result, TalError};
use tracing::debug;

/// Reads streak records back out of the four streak streams.
#[derive(Debug)]
pub struct StreakDecoder<'a> {
    palette: &'a Palette,
    chroma: MsbBitReader<'a>,
    count: MsbBitReader<'a>,
    color_type: MsbBitReader<'a>,
    body: MsbBitReader<'a>,
    remaining: u32,
}

impl<'a> StreakDecoder<'a> {
    /// Create a decoder over `fields`, resolving colors through `palette`.
    pub fn new(fields: &'a StreakFields, palette: &'a Palette) -> Self {
        Self {
            palette,
            chroma: MsbBitReader::new(&fields.chroma),
            count: MsbBitReader::new(&fields.count),
            color_type: MsbBitReader::new(&fields.color_type),
            body: MsbBitReader::new(&fields.body),
            remaining: fields.streak_count,
        }
    }

    /// Records not yet read.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Read the next record, `None` once every record has been read.
    pub fn next_streak(&mut self) -> Result<Option<Streak>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let is_multi = self.count.read_bit()?;
        let is_colored = self.chroma.read_bit()?;
        let is_favorite = if is_colored {
            Some(self.color_type.read_bit()?)
        } else {
            None
        };

        let length = if is_multi {
            match self.body.read_byte()? {
                0 => MAX_STREAK_LEN,
                n => n as u16,
            }
        } else {
            1
        };

        let color = match is_favorite {
            Some(favorite) => {
                let position = self.body.bits_read();
                let index = if favorite {
                    ColorIndex::Favorite(self.body.read_uint(4)? as u8)
                } else {
                    ColorIndex::Extended(self.body.read_byte()?)
                };
                let color = self.palette.resolve(index).ok_or_else(|| {
                    TalError::corrupt_stream(
                        position,
                        format!(
                            "{:?} does not exist in a palette of {} colors",
                            index,
                            self.palette.len()
                        ),
                    )
                })?;
                Some(color)
            }
            None => None,
        };

        self.remaining -= 1;
        Ok(Some(Streak::new(color, length)))
    }

    /// Read every record and expand it into a flat pixel sequence.
    ///
    /// Fails with `CorruptStream` unless the streaks add up to exactly
    /// `expected_pixels`.
    pub fn decode(mut self, expected_pixels: usize) -> Result<Vec<Pixel>> {
        let capacity = expected_pixels.min(self.remaining as usize * MAX_STREAK_LEN as usize);
        let mut pixels = Vec::with_capacity(capacity);

        while let Some(streak) = self.next_streak()? {
            let length = streak.length() as usize;
            if pixels.len() + length > expected_pixels {
                return Err(TalError::corrupt_stream(
                    self.body.bits_read(),
                    format!(
                        "streaks describe more than the {} pixels of the image",
                        expected_pixels
                    ),
                ));
            }
            pixels.extend(std::iter::repeat_n(streak.pixel(), length));
        }

        if pixels.len() != expected_pixels {
            return Err(TalError::corrupt_stream(
                self.body.bits_read(),
                format!(
                    "decoded {} pixels, expected {}",
                    pixels.len(),
                    expected_pixels
                ),
            ));
        }

        Ok(pixels)
    }
}

/// TAL decoder: TAL bytes in, raster out.
#[derive(Debug, Clone)]
pub struct TalDecoder {
    config: TalConfig,
}

impl TalDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: TalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The decoder's configuration.
    pub fn config(&self) -> &TalConfig {
        &self.config
    }

    /// Decode TAL bytes into a raster.
    pub fn decode(&self, data: &[u8]) -> Result<Raster> {
        self.decode_into(data)
    }

    /// Decode TAL bytes into any pixel sink.
    pub fn decode_into<S: PixelSink>(&self, data: &[u8]) -> Result<S> {
        let container = Container::parse_with_config(data, &self.config)?;
        let pixels = self.decode_container(&container)?;
        S::from_pixels(container.width, container.height, pixels)
    }

    /// Expand a parsed container into its row-major pixels.
    pub fn decode_container(&self, container: &Container) -> Result<Vec<Pixel>> {
        let expected = container.width as usize * container.height as usize;

        debug!(
            width = container.width,
            height = container.height,
            colors = container.palette.len(),
            streaks = container.fields.streak_count,
            body_bytes = container.fields.body.len(),
            "decoding container"
        );

        StreakDecoder::new(&container.fields, &container.palette).decode(expected)
    }
}

impl Default for TalDecoder {
    fn default() -> Self {
        Self {
            config: TalConfig::V1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::StreakEncoder;
    use tinyalpha_core::ErrorKind;

    fn px(v: u32) -> Pixel {
        Pixel::new(v)
    }

    fn encode_streaks(palette: &Palette, streaks: &[Streak]) -> StreakFields {
        let mut encoder = StreakEncoder::new(palette);
        for &streak in streaks {
            encoder.push(streak).unwrap();
        }
        encoder.finish()
    }

    #[test]
    fn test_records_read_back() {
        let colors: Vec<Pixel> = (1..=20).map(px).collect();
        let palette = Palette::from_colors(colors).unwrap();
        let streaks = [
            Streak::new(Some(px(1)), 256),
            Streak::new(None, 1),
            Streak::new(Some(px(19)), 2),
            Streak::new(None, 77),
            Streak::new(Some(px(16)), 1),
        ];
        let fields = encode_streaks(&palette, &streaks);

        let mut decoder = StreakDecoder::new(&fields, &palette);
        let mut decoded = Vec::new();
        while let Some(streak) = decoder.next_streak().unwrap() {
            decoded.push(streak);
        }
        assert_eq!(decoded, streaks);
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let palette = Palette::from_colors(vec![px(1)]).unwrap();
        let fields = encode_streaks(&palette, &[Streak::new(Some(px(1)), 4)]);

        let err = StreakDecoder::new(&fields, &palette).decode(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptStream);

        let err = StreakDecoder::new(&fields, &palette).decode(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptStream);

        let pixels = StreakDecoder::new(&fields, &palette).decode(4).unwrap();
        assert_eq!(pixels, vec![px(1); 4]);
    }

    #[test]
    fn test_index_outside_palette() {
        let big = Palette::from_colors((1..=5).map(px).collect()).unwrap();
        let fields = encode_streaks(&big, &[Streak::new(Some(px(5)), 1)]);

        let small = Palette::from_colors(vec![px(1)]).unwrap();
        let err = StreakDecoder::new(&fields, &small).decode(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptStream);
    }

    #[test]
    fn test_truncated_body() {
        let palette = Palette::from_colors(vec![px(1)]).unwrap();
        let mut fields = encode_streaks(&palette, &[Streak::new(Some(px(1)), 9)]);
        fields.body.clear();
        let err = StreakDecoder::new(&fields, &palette).decode(9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_missing_color_type_bits() {
        let palette = Palette::from_colors(vec![px(1)]).unwrap();
        let mut fields = encode_streaks(&palette, &[Streak::new(Some(px(1)), 1)]);
        fields.color_type.clear();
        let err = StreakDecoder::new(&fields, &palette).decode(1).unwrap_err();
        assert!(matches!(err, TalError::OutOfRange { position: 0, len: 0 }));
    }

    #[test]
    fn test_decoder_rejects_invalid_config() {
        assert!(TalDecoder::new(TalConfig::V1.with_max_dimension(10_000)).is_err());
        assert!(TalDecoder::new(TalConfig::V1.with_max_dimension(100)).is_ok());
    }
}
