//! # TinyAlpha Core
//!
//! Core components for the TinyAlpha (TAL) image codec.
//!
//! - [`bitstream`]: MSB-first bit cursor, reader and writer for the TAL bit-fields
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     tal encode / decode / info, PNG adapter             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Palette, streak encoder/decoder, container          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitCursor, MsbBitReader/MsbBitWriter, TalError      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tinyalpha_core::bitstream::{MsbBitReader, MsbBitWriter};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_uint(0xABC, 12);
//! let data = writer.into_bytes();
//!
//! let mut reader = MsbBitReader::new(&data);
//! assert_eq!(reader.read_uint(12).unwrap(), 0xABC);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitCursor, MsbBitReader, MsbBitWriter};
pub use error::{ErrorKind, Result, TalError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitCursor, MsbBitReader, MsbBitWriter};
    pub use crate::error::{ErrorKind, Result, TalError};
}
