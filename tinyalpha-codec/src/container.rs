//! TAL container layout.
//!
//! ```text
//! offset   size  field
//! 0        3     signature 08 09 03
//! 3        1     version 01
//! 4        4     width
//! 8        4     height
//! 12       1     palette entry count N
//! 13       4N    palette, most frequent first
//! 13+4N    4     chroma field byte length
//! +4       4     count field byte length
//! +4       4     color-type field byte length
//! +4       4     streak count
//! ...            chroma, count, color-type field bytes, then the body to EOF
//! ```
//!
//! All integers are big-endian.

use crate::config::TalConfig;
use crate::encoder::StreakFields;
use crate::palette::Palette;
use crate::pixel::Pixel;
use tinyalpha_core::{MsbBitWriter, Result, TalError};

/// TAL magic bytes.
pub const SIGNATURE: [u8; 3] = [0x08, 0x09, 0x03];

/// Format version written and accepted.
pub const VERSION: u8 = 0x01;

/// The palette count is a single byte.
pub const MAX_PALETTE_ENTRIES: usize = 255;

/// Bytes before the palette.
const PREFIX_LEN: usize = 13;

/// Bytes of field lengths and streak count after the palette.
const LENGTHS_LEN: usize = 16;

/// A parsed or ready-to-serialize TAL image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frequency-sorted palette.
    pub palette: Palette,
    /// Streak streams and record count.
    pub fields: StreakFields,
}

impl Container {
    /// Size of everything before the field bytes.
    pub fn header_len(&self) -> usize {
        PREFIX_LEN + 4 * self.palette.len() + LENGTHS_LEN
    }

    /// Total serialized size.
    pub fn encoded_len(&self) -> usize {
        self.header_len()
            + self.fields.chroma.len()
            + self.fields.count.len()
            + self.fields.color_type.len()
            + self.fields.body.len()
    }

    /// Serialize into the TAL byte layout.
    ///
    /// Fails with `TooManyColors` when the palette does not fit the one-byte
    /// entry count.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        if self.palette.len() > MAX_PALETTE_ENTRIES {
            return Err(TalError::too_many_colors(
                self.palette.len(),
                MAX_PALETTE_ENTRIES,
            ));
        }

        let mut out = MsbBitWriter::new();
        out.write_bytes(&SIGNATURE);
        out.write_byte(VERSION);
        out.write_bytes(&self.width.to_be_bytes());
        out.write_bytes(&self.height.to_be_bytes());

        out.write_byte(self.palette.len() as u8);
        for color in self.palette.colors() {
            out.write_bytes(&color.value().to_be_bytes());
        }

        out.write_bytes(&field_len(&self.fields.chroma, "chroma")?.to_be_bytes());
        out.write_bytes(&field_len(&self.fields.count, "count")?.to_be_bytes());
        out.write_bytes(&field_len(&self.fields.color_type, "color-type")?.to_be_bytes());
        out.write_bytes(&self.fields.streak_count.to_be_bytes());

        out.write_bytes(&self.fields.chroma);
        out.write_bytes(&self.fields.count);
        out.write_bytes(&self.fields.color_type);
        out.write_bytes(&self.fields.body);

        Ok(out.into_bytes())
    }

    /// Parse a TAL buffer with the V1 limits.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with_config(data, &TalConfig::V1)
    }

    /// Parse a TAL buffer.
    ///
    /// Every field offset is the running sum of the declared lengths before
    /// it; any offset past the end of `data` is `CorruptStream`.
    pub fn parse_with_config(data: &[u8], config: &TalConfig) -> Result<Self> {
        if data.len() < config.min_file_len {
            return Err(TalError::image_size(format!(
                "buffer of {} bytes is shorter than the {} byte minimum",
                data.len(),
                config.min_file_len
            )));
        }

        let mut reader = ByteReader::new(data);

        let signature = reader.take(SIGNATURE.len(), "signature")?;
        if signature != SIGNATURE {
            return Err(TalError::unrecognized_signature(
                SIGNATURE.to_vec(),
                signature.to_vec(),
            ));
        }

        let version = reader.read_u8("version")?;
        if version != VERSION {
            return Err(TalError::version_mismatch(VERSION, version));
        }

        let width = reader.read_u32("width")?;
        let height = reader.read_u32("height")?;
        config.check_dimensions(width, height)?;

        let entries = reader.read_u8("palette count")? as usize;
        let mut colors = Vec::with_capacity(entries);
        for i in 0..entries {
            let offset = reader.offset();
            let color = Pixel::new(reader.read_u32("palette entry")?);
            if color.is_transparent() {
                return Err(TalError::corrupt_stream(
                    offset as u64,
                    format!("palette entry {} is the transparent sentinel", i),
                ));
            }
            colors.push(color);
        }
        let palette = Palette::from_colors(colors)?;

        let chroma_len = reader.read_u32("chroma field length")? as usize;
        let count_len = reader.read_u32("count field length")? as usize;
        let color_type_len = reader.read_u32("color-type field length")? as usize;
        let streak_count_offset = reader.offset();
        let streak_count = reader.read_u32("streak count")?;

        let pixel_count = width as u64 * height as u64;
        if streak_count as u64 > pixel_count {
            return Err(TalError::corrupt_stream(
                streak_count_offset as u64,
                format!(
                    "{} streaks cannot fit in {} pixels",
                    streak_count, pixel_count
                ),
            ));
        }
        let flag_bytes = (streak_count as usize).div_ceil(8);
        if flag_bytes > chroma_len || flag_bytes > count_len {
            return Err(TalError::corrupt_stream(
                streak_count_offset as u64,
                format!(
                    "{} streaks need {} flag bytes, chroma field has {} and count field has {}",
                    streak_count, flag_bytes, chroma_len, count_len
                ),
            ));
        }

        let chroma = reader.take(chroma_len, "chroma field")?.to_vec();
        let count = reader.take(count_len, "count field")?.to_vec();
        let color_type = reader.take(color_type_len, "color-type field")?.to_vec();
        let body = reader.rest().to_vec();

        Ok(Self {
            width,
            height,
            palette,
            fields: StreakFields {
                chroma,
                count,
                color_type,
                body,
                streak_count,
            },
        })
    }
}

/// Whether `data` starts with the TAL signature.
pub fn is_tal(data: &[u8]) -> bool {
    data.starts_with(&SIGNATURE)
}

fn field_len(field: &[u8], name: &str) -> Result<u32> {
    u32::try_from(field.len()).map_err(|_| {
        TalError::image_size(format!(
            "{} field of {} bytes does not fit a 32-bit length",
            name,
            field.len()
        ))
    })
}

/// Bounds-checked big-endian reader over the container bytes.
struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                TalError::corrupt_stream(
                    self.offset as u64,
                    format!(
                        "{} needs {} bytes but only {} remain",
                        what,
                        len,
                        self.data.len() - self.offset
                    ),
                )
            })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.offset..];
        self.offset = self.data.len();
        bytes
    }
}
