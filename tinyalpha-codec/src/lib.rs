//! # TinyAlpha codec: Pure Rust TAL image encoding
//!
//! This crate encodes RGBA rasters into the TAL format and decodes them back.
//! TAL targets sprite-like images with few colors and large transparent
//! areas.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Lossless**: Every pixel survives a round trip bit for bit
//! - **Frequency-sorted palette**: The 16 most frequent colors get 4-bit indices
//! - **Streaks**: Runs of up to 256 identical pixels, crossing row boundaries
//! - **`image` integration**: `RgbaImage` as source and sink (`image` feature)
//!
//! ## Format
//!
//! A TAL file is a fixed header, a palette of up to 255 RGBA colors, and four
//! streams describing the streaks:
//!
//! - **chroma**: one bit per streak, colored or transparent
//! - **count**: one bit per streak, single pixel or multi-pixel
//! - **color-type**: one bit per colored streak, favorite or extended index
//! - **body**: length bytes and color indices
//!
//! See [`container`] for the byte layout.
//!
//! ## Example
//!
//! ```rust
//! use tinyalpha_codec::{Pixel, Raster, decode, encode};
//!
//! let red = Pixel::from_rgba([255, 0, 0, 255]);
//! let mut pixels = vec![red; 8];
//! pixels.extend([Pixel::TRANSPARENT; 8]);
//! let raster = Raster::new(4, 4, pixels).unwrap();
//!
//! let bytes = encode(&raster).unwrap();
//! let decoded = decode(&bytes).unwrap();
//!
//! assert_eq!(decoded, raster);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
pub mod container;
mod decoder;
mod encoder;
#[cfg(feature = "image")]
mod image_adapter;
mod info;
pub mod palette;
mod pixel;
mod raster;
pub mod streak;

pub use config::TalConfig;
pub use container::{Container, is_tal};
pub use decoder::{StreakDecoder, TalDecoder};
pub use encoder::{FieldBits, StreakEncoder, StreakFields, TalEncoder};
pub use info::{TalInfo, inspect};
pub use palette::{ColorIndex, Palette};
pub use pixel::Pixel;
pub use raster::{PixelSink, PixelSource, Raster};
pub use streak::{Streak, Streaks};
pub use tinyalpha_core::{ErrorKind, Result, TalError};

/// Encode a raster into TAL bytes with the V1 limits.
///
/// # Example
///
/// ```rust
/// use tinyalpha_codec::{Pixel, Raster, encode};
///
/// let raster = Raster::filled(16, 16, Pixel::new(0x336699FF)).unwrap();
/// let bytes = encode(&raster).unwrap();
/// assert_eq!(&bytes[..4], &[0x08, 0x09, 0x03, 0x01]);
/// ```
pub fn encode(raster: &Raster) -> Result<Vec<u8>> {
    TalEncoder::default().encode(raster)
}

/// Decode TAL bytes into a raster with the V1 limits.
///
/// # Example
///
/// ```rust
/// use tinyalpha_codec::{Pixel, Raster, decode, encode};
///
/// let raster = Raster::filled(3, 3, Pixel::TRANSPARENT).unwrap();
/// let decoded = decode(&encode(&raster).unwrap()).unwrap();
/// assert_eq!(decoded.width(), 3);
/// assert!(decoded.pixels().iter().all(|p| p.is_transparent()));
/// ```
pub fn decode(data: &[u8]) -> Result<Raster> {
    TalDecoder::default().decode(data)
}

/// Encode a raster with the given configuration.
pub fn encode_with_config(raster: &Raster, config: TalConfig) -> Result<Vec<u8>> {
    TalEncoder::new(config)?.encode(raster)
}

/// Decode TAL bytes with the given configuration.
pub fn decode_with_config(data: &[u8], config: TalConfig) -> Result<Raster> {
    TalDecoder::new(config)?.decode(data)
}
