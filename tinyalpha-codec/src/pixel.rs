//! Packed RGBA pixels.

use std::fmt;

/// A 32-bit packed RGBA color, `u32::from_be_bytes([r, g, b, a])`.
///
/// The all-zero value is the transparent sentinel. It is never a palette
/// entry; [`Pixel::chroma`] maps it to `None` so the codec deals in
/// `Option<Pixel>` instead of comparing against zero. An all-zero pixel has
/// alpha 0, so no opaque color collides with the sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pixel(u32);

impl Pixel {
    /// The transparent sentinel.
    pub const TRANSPARENT: Self = Self(0);

    /// Wrap a packed color value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Pack RGBA channels.
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(rgba))
    }

    /// The packed color value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Unpack into RGBA channels.
    pub const fn to_rgba(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Whether this is the transparent sentinel.
    pub const fn is_transparent(self) -> bool {
        self.0 == 0
    }

    /// `None` for the transparent sentinel, the pixel itself otherwise.
    pub const fn chroma(self) -> Option<Self> {
        if self.is_transparent() {
            None
        } else {
            Some(self)
        }
    }
}

impl From<u32> for Pixel {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Pixel> for u32 {
    fn from(pixel: Pixel) -> Self {
        pixel.0
    }
}

impl From<Option<Pixel>> for Pixel {
    fn from(color: Option<Pixel>) -> Self {
        color.unwrap_or(Self::TRANSPARENT)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_packing() {
        let pixel = Pixel::from_rgba([0x12, 0x34, 0x56, 0x78]);
        assert_eq!(pixel.value(), 0x1234_5678);
        assert_eq!(pixel.to_rgba(), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(pixel.to_string(), "#12345678");
    }

    #[test]
    fn test_sentinel() {
        assert!(Pixel::TRANSPARENT.is_transparent());
        assert_eq!(Pixel::TRANSPARENT.chroma(), None);
        assert_eq!(Pixel::from(None), Pixel::TRANSPARENT);

        // Opaque black is a real color.
        let black = Pixel::from_rgba([0, 0, 0, 255]);
        assert_eq!(black.chroma(), Some(black));

        // Transparent with color channels is still a distinct, non-sentinel value.
        let tinted = Pixel::from_rgba([255, 0, 0, 0]);
        assert!(!tinted.is_transparent());
    }
}
