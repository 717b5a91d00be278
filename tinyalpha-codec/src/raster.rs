//! In-memory rasters and the traits that connect them to image libraries.

use crate::config::TalConfig;
use crate::pixel::Pixel;
use std::slice::ChunksExact;
use tinyalpha_core::{Result, TalError};

/// Something the encoder can read pixels from, in row-major order.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Pixel at column `x`, row `y`. Callers stay within `width` x `height`.
    fn pixel(&self, x: u32, y: u32) -> Pixel;

    /// Copy every pixel into a [`Raster`].
    fn to_raster(&self) -> Result<Raster> {
        let (width, height) = (self.width(), self.height());
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.pixel(x, y));
            }
        }
        Raster::new(width, height, pixels)
    }
}

/// Something the decoder can materialize a flat, row-major pixel sequence into.
pub trait PixelSink: Sized {
    /// Build the output from `pixels`, which holds exactly `width * height` entries.
    fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self>;
}

/// A width x height grid of pixels stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Raster {
    /// Create a raster from row-major pixels.
    ///
    /// Fails with `ImageSize` when a dimension exceeds the format limit or
    /// `pixels` does not hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        TalConfig::V1.check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TalError::image_size(format!(
                "{}x{} raster needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        TalConfig::V1.check_dimensions(width, height)?;
        Self::new(width, height, vec![pixel; width as usize * height as usize])
    }

    /// Create a raster from packed 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(TalError::image_size(format!(
                "RGBA buffer length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Pixel::from_rgba([c[0], c[1], c[2], c[3]]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Flatten into packed 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgba()).collect()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Consume the raster and return its pixels.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Pixel at column `x`, row `y`, if inside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate over rows.
    pub fn rows(&self) -> ChunksExact<'_, Pixel> {
        // A zero-width raster has no pixels, so any nonzero chunk size yields no rows.
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Whether the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

impl PixelSource for Raster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn to_raster(&self) -> Result<Raster> {
        Ok(self.clone())
    }
}

impl PixelSink for Raster {
    fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        Self::new(width, height, pixels)
    }
}
