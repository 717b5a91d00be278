//! Frequency-sorted color palette.
//!
//! The palette lists every distinct non-transparent color of a raster, most
//! frequent first, ties broken by first appearance in row-major order. The
//! decoder has no other way to rebuild the index-to-color mapping, so the
//! ordering must be deterministic.
//!
//! The first [`FAVORITE_COUNT`] entries are *favorites* and are addressed
//! with a 4-bit index; every other entry is addressed with an 8-bit index
//! into the full palette.

use crate::pixel::Pixel;
use std::collections::HashMap;
use tinyalpha_core::{Result, TalError};

/// Number of favorite palette entries.
pub const FAVORITE_COUNT: usize = 16;

/// Maximum number of palette entries.
pub const MAX_COLORS: usize = 256;

/// How a color is addressed in the streak body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorIndex {
    /// Index 0-15 into the favorites, written with 4 bits.
    Favorite(u8),
    /// Index into the full palette, written with 8 bits.
    Extended(u8),
}

impl ColorIndex {
    /// Bits needed for this index in the body.
    pub fn width(self) -> u8 {
        match self {
            Self::Favorite(_) => 4,
            Self::Extended(_) => 8,
        }
    }

    /// The raw index value.
    pub fn value(self) -> u8 {
        match self {
            Self::Favorite(i) | Self::Extended(i) => i,
        }
    }

    /// Whether this addresses a favorite.
    pub fn is_favorite(self) -> bool {
        matches!(self, Self::Favorite(_))
    }
}

/// Ordered list of up to 256 distinct non-transparent colors.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    /// Colors, most frequent first.
    colors: Vec<Pixel>,
    /// Reverse lookup: color -> position in `colors`.
    positions: HashMap<Pixel, u8>,
}

impl Palette {
    /// Build the palette of `pixels` with the default 256 color limit.
    pub fn build(pixels: &[Pixel]) -> Result<Self> {
        Self::build_with_limit(pixels, MAX_COLORS)
    }

    /// Build the palette of `pixels`, failing with `TooManyColors` once more
    /// than `max_colors` distinct non-transparent colors have been seen.
    pub fn build_with_limit(pixels: &[Pixel], max_colors: usize) -> Result<Self> {
        let max_colors = max_colors.min(MAX_COLORS);

        // (color, occurrences) in first-seen order
        let mut tally: Vec<(Pixel, usize)> = Vec::new();
        let mut slots: HashMap<Pixel, usize> = HashMap::new();

        for &pixel in pixels {
            let Some(color) = pixel.chroma() else {
                continue;
            };
            match slots.get(&color) {
                Some(&slot) => tally[slot].1 += 1,
                None => {
                    if tally.len() == max_colors {
                        return Err(TalError::too_many_colors(max_colors + 1, max_colors));
                    }
                    slots.insert(color, tally.len());
                    tally.push((color, 1));
                }
            }
        }

        // Stable: equal counts keep first-seen order.
        tally.sort_by(|a, b| b.1.cmp(&a.1));

        Self::from_colors(tally.into_iter().map(|(color, _)| color).collect())
    }

    /// Wrap an already ordered list of colors.
    ///
    /// Fails with `TooManyColors` above 256 entries. A repeated color keeps
    /// the lookup position of its first occurrence.
    pub fn from_colors(colors: Vec<Pixel>) -> Result<Self> {
        if colors.len() > MAX_COLORS {
            return Err(TalError::too_many_colors(colors.len(), MAX_COLORS));
        }
        let mut positions = HashMap::with_capacity(colors.len());
        for (i, &color) in colors.iter().enumerate() {
            positions.entry(color).or_insert(i as u8);
        }
        Ok(Self { colors, positions })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All entries, most frequent first.
    pub fn colors(&self) -> &[Pixel] {
        &self.colors
    }

    /// The favorite entries (the first 16, or fewer).
    pub fn favorites(&self) -> &[Pixel] {
        &self.colors[..self.colors.len().min(FAVORITE_COUNT)]
    }

    /// Entry at `index` in the full palette.
    pub fn get(&self, index: u8) -> Option<Pixel> {
        self.colors.get(index as usize).copied()
    }

    /// Resolve a body index back to its color.
    pub fn resolve(&self, index: ColorIndex) -> Option<Pixel> {
        match index {
            ColorIndex::Favorite(i) => self.favorites().get(i as usize).copied(),
            ColorIndex::Extended(i) => self.get(i),
        }
    }

    /// Find how `color` is addressed.
    ///
    /// Favorites get their 4-bit position; any other entry gets its 8-bit
    /// position in the full palette.
    pub fn lookup(&self, color: Pixel) -> Option<ColorIndex> {
        let position = *self.positions.get(&color)?;
        if (position as usize) < FAVORITE_COUNT {
            Some(ColorIndex::Favorite(position))
        } else {
            Some(ColorIndex::Extended(position))
        }
    }
}

impl PartialEq for Palette {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}

impl Eq for Palette {}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyalpha_core::ErrorKind;

    fn px(v: u32) -> Pixel {
        Pixel::new(v)
    }

    #[test]
    fn test_frequency_order() {
        let pixels = [px(1), px(2), px(2), px(3), px(3), px(3)];
        let palette = Palette::build(&pixels).unwrap();
        assert_eq!(palette.colors(), &[px(3), px(2), px(1)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let pixels = [px(9), px(4), px(7), px(4), px(7), px(9)];
        let palette = Palette::build(&pixels).unwrap();
        assert_eq!(palette.colors(), &[px(9), px(4), px(7)]);
    }

    #[test]
    fn test_sentinel_excluded() {
        let pixels = [Pixel::TRANSPARENT; 10];
        let palette = Palette::build(&pixels).unwrap();
        assert!(palette.is_empty());
        assert_eq!(palette.lookup(Pixel::TRANSPARENT), None);

        let pixels = [Pixel::TRANSPARENT, px(5), Pixel::TRANSPARENT];
        let palette = Palette::build(&pixels).unwrap();
        assert_eq!(palette.colors(), &[px(5)]);
    }

    #[test]
    fn test_too_many_colors() {
        let pixels: Vec<Pixel> = (1..=257).map(px).collect();
        let err = Palette::build(&pixels).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooManyColors);

        let pixels: Vec<Pixel> = (1..=256).map(px).collect();
        assert_eq!(Palette::build(&pixels).unwrap().len(), 256);
    }

    #[test]
    fn test_custom_limit() {
        let pixels: Vec<Pixel> = (1..=17).map(px).collect();
        assert!(Palette::build_with_limit(&pixels, 16).is_err());
        assert!(Palette::build_with_limit(&pixels, 17).is_ok());
    }

    #[test]
    fn test_favorites_and_lookup() {
        // 20 colors: color n appears (21 - n) times, so the order is 1..=20.
        let pixels: Vec<Pixel> = (1..=20u32)
            .flat_map(|n| std::iter::repeat_n(px(n), (21 - n) as usize))
            .collect();
        let palette = Palette::build(&pixels).unwrap();
        assert_eq!(palette.len(), 20);
        assert_eq!(palette.favorites().len(), 16);
        assert_eq!(palette.favorites()[15], px(16));

        assert_eq!(palette.lookup(px(1)), Some(ColorIndex::Favorite(0)));
        assert_eq!(palette.lookup(px(16)), Some(ColorIndex::Favorite(15)));
        assert_eq!(palette.lookup(px(17)), Some(ColorIndex::Extended(16)));
        assert_eq!(palette.lookup(px(20)), Some(ColorIndex::Extended(19)));
        assert_eq!(palette.lookup(px(21)), None);

        assert_eq!(palette.resolve(ColorIndex::Favorite(15)), Some(px(16)));
        assert_eq!(palette.resolve(ColorIndex::Extended(19)), Some(px(20)));
        assert_eq!(palette.resolve(ColorIndex::Extended(20)), None);
    }

    #[test]
    fn test_short_palette_favorites() {
        let palette = Palette::from_colors(vec![px(1), px(2)]).unwrap();
        assert_eq!(palette.favorites(), &[px(1), px(2)]);
        assert_eq!(palette.resolve(ColorIndex::Favorite(2)), None);
    }

    #[test]
    fn test_index_widths() {
        assert_eq!(ColorIndex::Favorite(3).width(), 4);
        assert_eq!(ColorIndex::Extended(200).width(), 8);
        assert_eq!(ColorIndex::Extended(200).value(), 200);
        assert!(ColorIndex::Favorite(0).is_favorite());
        assert!(!ColorIndex::Extended(16).is_favorite());
    }

    #[test]
    fn test_from_colors_limit() {
        let colors: Vec<Pixel> = (1..=257).map(px).collect();
        assert!(Palette::from_colors(colors).is_err());
    }
}
