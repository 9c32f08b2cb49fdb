//! Frame - A rectangular buffer of RGB pixels
//!
//! A `Frame` holds one video frame as `width * height` colors.
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, without padding
//! - The pixel at `(x, y)` has index `y * width + x`
//! - Width and height are always non-zero
//!
//! Quantizers do not read a `Frame` directly; they read any
//! [`PixelSource`], which `Frame` implements.

mod access;

use crate::color::Rgb;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Random access to the pixels of one frame.
///
/// Pixels are addressed by index in `0..num_pixels()`, row-major.
/// Implementors never need to be mutable.
pub trait PixelSource {
    /// Total number of pixels.
    fn num_pixels(&self) -> usize;

    /// Color of the pixel at `index`.
    ///
    /// # Panics
    ///
    /// May panic if `index >= num_pixels()`.
    fn pixel_color(&self, index: usize) -> Rgb;
}

/// One frame of RGB pixels.
///
/// # Examples
///
/// ```
/// use framequant_core::{Frame, Rgb};
///
/// let frame = Frame::from_pixels(2, 1, vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(frame.get_pixel(1, 0), Some(Rgb::WHITE));
/// assert_eq!(frame.get_pixel(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Frame {
    /// Create a new frame with every pixel black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; len],
        })
    }

    /// Create a frame from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferSizeMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self> {
        let len = checked_len(width, height)?;
        if pixels.len() != len {
            return Err(Error::BufferSizeMismatch {
                expected: len,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a frame from packed RGB24 bytes (`R, G, B, R, G, B, ...`).
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let len = checked_len(width, height)?;
        if bytes.len() != len * 3 {
            return Err(Error::BufferSizeMismatch {
                expected: len * 3,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a frame from packed `0xRRGGBBAA` words. Alpha is dropped.
    pub fn from_packed(width: u32, height: u32, words: &[u32]) -> Result<Self> {
        let len = checked_len(width, height)?;
        if words.len() != len {
            return Err(Error::BufferSizeMismatch {
                expected: len,
                actual: words.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: words.iter().map(|&w| Rgb::from_packed(w)).collect(),
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

    /// Total number of pixels
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.pixels.len()
    }

    /// All pixels, row-major
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Count the distinct colors in the frame.
    pub fn count_colors(&self) -> usize {
        self.pixels.iter().collect::<HashSet<_>>().len()
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })
}

impl PixelSource for Frame {
    #[inline]
    fn num_pixels(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    fn pixel_color(&self, index: usize) -> Rgb {
        self.pixels[index]
    }
}

impl PixelSource for [Rgb] {
    #[inline]
    fn num_pixels(&self) -> usize {
        self.len()
    }

    #[inline]
    fn pixel_color(&self, index: usize) -> Rgb {
        self[index]
    }
}

#[cfg(feature = "image")]
impl TryFrom<&image::RgbImage> for Frame {
    type Error = Error;

    /// Copy a decoded image into a frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the image has a zero dimension.
    fn try_from(img: &image::RgbImage) -> Result<Self> {
        checked_len(img.width(), img.height())?;
        Ok(Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| Rgb::from(p.0)).collect(),
        })
    }
}
