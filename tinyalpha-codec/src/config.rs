//! TAL format parameters.

use tinyalpha_core::{Result, TalError};

/// TAL codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TalConfig {
    /// Largest accepted width or height in pixels.
    pub max_dimension: u32,
    /// Largest number of distinct non-transparent colors in a palette.
    pub max_colors: usize,
    /// Shortest buffer the decoder will look at.
    pub min_file_len: usize,
}

impl TalConfig {
    /// Version 1 of the TAL format.
    ///
    /// - 8192 x 8192 pixels at most
    /// - 256 distinct colors
    /// - 19 byte minimum file size
    pub const V1: Self = Self {
        max_dimension: 8192,
        max_colors: 256,
        min_file_len: 19,
    };

    /// Tighten the dimension limit.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Tighten the color limit.
    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    /// Check that the configuration stays within what the V1 format can express.
    ///
    /// Limits may be tightened but never loosened, and the minimum file size
    /// is fixed by the header layout.
    pub fn validate(&self) -> Result<()> {
        let v1 = Self::V1;
        if self.max_dimension > v1.max_dimension {
            return Err(TalError::invalid_config(format!(
                "max_dimension {} exceeds the format limit of {}",
                self.max_dimension, v1.max_dimension
            )));
        }
        if self.max_colors > v1.max_colors {
            return Err(TalError::invalid_config(format!(
                "max_colors {} exceeds the format limit of {}",
                self.max_colors, v1.max_colors
            )));
        }
        if self.min_file_len != v1.min_file_len {
            return Err(TalError::invalid_config(format!(
                "min_file_len is fixed at {} by the header layout",
                v1.min_file_len
            )));
        }
        Ok(())
    }

    /// Check raster dimensions against the limit.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(TalError::image_size(format!(
                "{}x{} exceeds the maximum of {}x{}",
                width, height, self.max_dimension, self.max_dimension
            )));
        }
        Ok(())
    }
}

impl Default for TalConfig {
    fn default() -> Self {
        Self::V1
    }
}
