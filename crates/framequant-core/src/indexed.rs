//! IndexedFrame - A palette plus per-pixel palette indices
//!
//! This is what a quantizer hands to an indexed-color encoder.

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::palette::Palette;

/// A frame whose pixels are indices into a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    width: u32,
    height: u32,
    palette: Palette,
    indices: Vec<u8>,
}

impl IndexedFrame {
    /// Create an indexed frame.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if either dimension is zero
    /// - [`Error::BufferSizeMismatch`] if `indices.len() != width * height`
    /// - [`Error::PaletteIndexOutOfRange`] if any index is `>= palette.len()`
    pub fn new(width: u32, height: u32, palette: Palette, indices: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: indices.len(),
            });
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= palette.len()) {
            return Err(Error::PaletteIndexOutOfRange {
                index: bad as usize,
                len: palette.len(),
            });
        }
        Ok(Self {
            width,
            height,
            palette,
            indices,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The palette
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// All palette indices, row-major
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Get the palette index at (x, y), or `None` if out of bounds.
    pub fn get_index(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.indices[y as usize * self.width as usize + x as usize])
    }

    /// Get the palette color at (x, y), or `None` if out of bounds.
    pub fn get_color(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get_index(x, y).and_then(|i| self.palette.get(i as usize))
    }

    /// Render the indices back to RGB through the palette.
    pub fn to_frame(&self) -> Result<Frame> {
        let colors = self.palette.colors();
        let pixels = self.indices.iter().map(|&i| colors[i as usize]).collect();
        Frame::from_pixels(self.width, self.height, pixels)
    }

    /// Split into palette and indices.
    pub fn into_parts(self) -> (Palette, Vec<u8>) {
        (self.palette, self.indices)
    }
}
