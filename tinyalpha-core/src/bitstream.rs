//! MSB-first bit-level I/O for the TAL bit-fields.
//!
//! TAL packs its chroma, count and color-type fields and its body MSB-first:
//! bit 0 of a cursor position is the most significant bit of its byte.
//!
//! The position is a plain [`BitCursor`] value (byte index, bit-in-byte index).
//! The cursor never owns a buffer; it is handed the buffer on every call and
//! returns the advanced position. [`MsbBitReader`] and [`MsbBitWriter`] pair one
//! cursor with one buffer for sequential use.
//!
//! # Example
//!
//! ```
//! use tinyalpha_core::bitstream::{MsbBitReader, MsbBitWriter};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_bit(true);
//! writer.write_uint(0b0110, 4);
//! let data = writer.into_bytes();
//! assert_eq!(data, vec![0b1011_0000]);
//!
//! let mut reader = MsbBitReader::new(&data);
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.read_uint(4).unwrap(), 0b0110);
//! ```

use crate::error::{Result, TalError};

/// A bit position inside a byte buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitCursor {
    /// Index of the current byte.
    byte: usize,
    /// Index of the current bit within the byte, 0 = MSB.
    bit: u8,
}

impl BitCursor {
    /// Cursor at the first bit of a buffer.
    pub const START: Self = Self { byte: 0, bit: 0 };

    /// Create a cursor at `byte`, `bit`. Bit indices of 8 or more carry into the byte index.
    pub fn new(byte: usize, bit: u8) -> Self {
        Self {
            byte: byte + (bit / 8) as usize,
            bit: bit % 8,
        }
    }

    /// Create a cursor from an absolute bit position.
    pub fn from_position(position: u64) -> Self {
        Self {
            byte: (position / 8) as usize,
            bit: (position % 8) as u8,
        }
    }

    /// Current byte index.
    pub fn byte(&self) -> usize {
        self.byte
    }

    /// Current bit index within the byte (0 = most significant).
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// Absolute bit position, `byte * 8 + bit`.
    pub fn position(&self) -> u64 {
        self.byte as u64 * 8 + self.bit as u64
    }

    /// Whether the cursor sits on a byte boundary.
    pub fn is_byte_aligned(&self) -> bool {
        self.bit == 0
    }

    /// Number of bytes needed to hold every bit before this cursor.
    pub fn byte_len(&self) -> usize {
        self.byte + usize::from(self.bit != 0)
    }

    /// The cursor `count` bits further on.
    #[inline]
    pub fn advance(self, count: usize) -> Self {
        let bit = self.bit as usize + count;
        Self {
            byte: self.byte + bit / 8,
            bit: (bit % 8) as u8,
        }
    }

    /// Read the bit under the cursor and return it with the advanced cursor.
    ///
    /// Fails with [`TalError::OutOfRange`] when the cursor is past the end of `data`.
    #[inline]
    pub fn read_bit(self, data: &[u8]) -> Result<(bool, Self)> {
        let byte = data
            .get(self.byte)
            .ok_or_else(|| TalError::out_of_range(self.position(), data.len()))?;
        let mask = 0x80u8 >> self.bit;
        Ok((byte & mask != 0, self.advance(1)))
    }

    /// Write one bit under the cursor and return the advanced cursor.
    ///
    /// A zero byte is appended first when the cursor is past the end of `buf`.
    #[inline]
    pub fn write_bit(self, buf: &mut Vec<u8>, value: bool) -> Self {
        if self.byte >= buf.len() {
            buf.resize(self.byte + 1, 0);
        }
        let mask = 0x80u8 >> self.bit;
        if value {
            buf[self.byte] |= mask;
        } else {
            buf[self.byte] &= !mask;
        }
        self.advance(1)
    }
}

/// MSB-first sequential bit reader over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct MsbBitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Current read position.
    cursor: BitCursor,
}

impl<'a> MsbBitReader<'a> {
    /// Create a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_cursor(data, BitCursor::START)
    }

    /// Create a reader positioned at `cursor`.
    pub fn with_cursor(data: &'a [u8], cursor: BitCursor) -> Self {
        Self { data, cursor }
    }

    /// Current read position.
    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }

    /// Total bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.cursor.position()
    }

    /// Bits left between the cursor and the end of the buffer.
    pub fn remaining_bits(&self) -> u64 {
        (self.data.len() as u64 * 8).saturating_sub(self.cursor.position())
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        let (value, next) = self.cursor.read_bit(self.data)?;
        self.cursor = next;
        Ok(value)
    }

    /// Read `count` bits as individual flags, first bit first.
    pub fn read_bits(&mut self, count: usize) -> Result<Vec<bool>> {
        (0..count).map(|_| self.read_bit()).collect()
    }

    /// Read up to 32 bits as a big-endian unsigned integer.
    pub fn read_uint(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Read eight bits as a byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_uint(8)? as u8)
    }
}

/// MSB-first sequential bit writer over an owned, growable buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsbBitWriter {
    /// Output buffer. Unused trailing bits of the last byte are zero.
    bytes: Vec<u8>,
    /// Current write position.
    cursor: BitCursor,
}

impl MsbBitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current write position.
    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.cursor.position()
    }

    /// Number of bytes holding the written bits.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Written bytes, last byte zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the writer and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, value: bool) {
        self.cursor = self.cursor.write_bit(&mut self.bytes, value);
    }

    /// Write a sequence of flags, first flag first.
    pub fn write_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_uint(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 != 0);
        }
    }

    /// Write a whole byte.
    pub fn write_byte(&mut self, byte: u8) {
        if self.cursor.is_byte_aligned() && self.cursor.byte() == self.bytes.len() {
            self.bytes.push(byte);
            self.cursor = self.cursor.advance(8);
        } else {
            self.write_uint(byte as u32, 8);
        }
    }

    /// Write a run of whole bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.cursor.is_byte_aligned() && self.cursor.byte() == self.bytes.len() {
            self.bytes.extend_from_slice(bytes);
            self.cursor = self.cursor.advance(bytes.len() * 8);
        } else {
            for &byte in bytes {
                self.write_uint(byte as u32, 8);
            }
        }
    }
}
