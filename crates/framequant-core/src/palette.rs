//! Palette - Bounded ordered list of colors
//!
//! A palette holds at most [`MAX_PALETTE_COLORS`] entries, which is what an
//! 8-bit indexed encoder can address.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Maximum number of colors a palette can hold.
pub const MAX_PALETTE_COLORS: usize = 256;

/// Ordered color palette for indexed frames.
///
/// The position of a color is its palette index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self {
            colors: Vec::with_capacity(MAX_PALETTE_COLORS),
        }
    }

    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteFull`] if more than [`MAX_PALETTE_COLORS`]
    /// colors are given.
    pub fn from_colors(colors: Vec<Rgb>) -> Result<Self> {
        if colors.len() > MAX_PALETTE_COLORS {
            return Err(Error::PaletteFull {
                max: MAX_PALETTE_COLORS,
            });
        }
        Ok(Self { colors })
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Remove all colors.
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    /// Append a color, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteFull`] if the palette already holds
    /// [`MAX_PALETTE_COLORS`] colors.
    pub fn add_color(&mut self, color: Rgb) -> Result<usize> {
        if self.colors.len() >= MAX_PALETTE_COLORS {
            return Err(Error::PaletteFull {
                max: MAX_PALETTE_COLORS,
            });
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Get a color by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Get all colors as a slice
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Iterate over the colors in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Rgb> {
        self.colors.iter()
    }

    /// Find the index of the color closest to `color`.
    ///
    /// Distance is squared Euclidean in RGB; ties go to the lowest index.
    /// Returns `None` for an empty palette.
    pub fn find_nearest(&self, color: Rgb) -> Option<usize> {
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|&(i, c)| (c.distance_squared(color), i))
            .map(|(i, _)| i)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgb;
    type IntoIter = std::slice::Iter<'a, Rgb>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}
