//! Pixel access functions
//!
//! Coordinate-based getters and setters for individual pixels.

use super::Frame;
use crate::color::Rgb;
use crate::error::{Error, Result};

impl Frame {
    /// Get the color of the pixel at `index` (row-major).
    ///
    /// Returns `None` if `index >= num_pixels()`.
    #[inline]
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Get a pixel color at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel color without bounds checking on `x`.
    ///
    /// # Panics
    ///
    /// Panics if the computed index falls outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Set a pixel color at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        self.set_pixel_unchecked(x, y, color);
        Ok(())
    }

    /// Set a pixel color without bounds checking on `x`.
    ///
    /// # Panics
    ///
    /// Panics if the computed index falls outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut frame = Frame::new(4, 3).unwrap();
        frame.set_pixel(3, 2, Rgb::new(10, 20, 30)).unwrap();
        assert_eq!(frame.get_pixel(3, 2), Some(Rgb::new(10, 20, 30)));
        assert_eq!(frame.pixel(11), Some(Rgb::new(10, 20, 30)));
        assert_eq!(frame.pixel(12), None);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut frame = Frame::new(2, 2).unwrap();
        assert_eq!(frame.get_pixel(2, 0), None);
        assert_eq!(frame.get_pixel(0, 2), None);
        assert!(matches!(
            frame.set_pixel(0, 5, Rgb::WHITE),
            Err(Error::IndexOutOfBounds { index: 5, len: 2 })
        ));
    }
}
