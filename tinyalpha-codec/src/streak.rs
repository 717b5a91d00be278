//! Streaks: runs of identical pixels in row-major order.
//!
//! A streak never breaks at a row boundary; it only ends when the color
//! changes or when it reaches [`MAX_STREAK_LEN`] pixels, in which case the
//! run continues in a fresh streak.

use crate::pixel::Pixel;

/// Longest run a single streak record can describe.
pub const MAX_STREAK_LEN: u16 = 256;

/// One run of identical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    /// `None` for a transparent run.
    color: Option<Pixel>,
    /// Number of pixels, 1..=256.
    length: u16,
}

impl Streak {
    /// Create a streak of `length` pixels of `color`.
    ///
    /// The length is not checked here; [`StreakEncoder::push`] rejects
    /// streaks that are not [`valid`](Self::is_valid).
    ///
    /// [`StreakEncoder::push`]: crate::StreakEncoder::push
    pub fn new(color: Option<Pixel>, length: u16) -> Self {
        Self { color, length }
    }

    /// Create a streak from a raw pixel, mapping the sentinel to transparent.
    pub fn of_pixel(pixel: Pixel, length: u16) -> Self {
        Self::new(pixel.chroma(), length)
    }

    /// The run's color, `None` if transparent.
    pub fn color(&self) -> Option<Pixel> {
        self.color
    }

    /// The run's raw pixel value, the sentinel if transparent.
    pub fn pixel(&self) -> Pixel {
        Pixel::from(self.color)
    }

    /// Number of pixels in the run.
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Whether the run has a color.
    pub fn is_colored(&self) -> bool {
        self.color.is_some()
    }

    /// Whether the run covers more than one pixel and so carries a length byte.
    pub fn is_multi(&self) -> bool {
        self.length > 1
    }

    /// Whether the length fits a record, 1..=256.
    pub fn is_valid(&self) -> bool {
        (1..=MAX_STREAK_LEN).contains(&self.length)
    }
}

/// Iterator splitting a row-major pixel sequence into streaks.
#[derive(Debug, Clone)]
pub struct Streaks<'a> {
    pixels: &'a [Pixel],
    pos: usize,
}

impl<'a> Streaks<'a> {
    /// Split `pixels` into streaks of at most [`MAX_STREAK_LEN`].
    pub fn new(pixels: &'a [Pixel]) -> Self {
        Self { pixels, pos: 0 }
    }
}

impl Iterator for Streaks<'_> {
    type Item = Streak;

    fn next(&mut self) -> Option<Streak> {
        let rest = &self.pixels[self.pos..];
        let &current = rest.first()?;

        let run = rest
            .iter()
            .take(MAX_STREAK_LEN as usize)
            .take_while(|&&p| p == current)
            .count();
        self.pos += run;

        // The trailing run ends on, and so carries, the bottom-right pixel.
        Some(Streak::of_pixel(current, run as u16))
    }
}
