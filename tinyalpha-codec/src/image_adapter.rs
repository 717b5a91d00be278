//! [`image::RgbaImage`] as a pixel source and sink.

use crate::pixel::Pixel;
use crate::raster::{PixelSink, PixelSource, Raster};
use image::{Rgba, RgbaImage};
use tinyalpha_core::{Result, TalError};

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        let Rgba(rgba) = *self.get_pixel(x, y);
        Pixel::from_rgba(rgba)
    }

    fn to_raster(&self) -> Result<Raster> {
        let (width, height) = self.dimensions();
        Raster::from_rgba8(width, height, self.as_raw())
    }
}

impl PixelSink for RgbaImage {
    fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let bytes: Vec<u8> = pixels.iter().flat_map(|p| p.to_rgba()).collect();
        RgbaImage::from_raw(width, height, bytes).ok_or_else(|| {
            TalError::image_size(format!(
                "{} pixels do not fill a {}x{} image",
                pixels.len(),
                width,
                height
            ))
        })
    }
}
