//! Framequant Core - Basic data structures for palette quantization
//!
//! This crate provides the fundamental data structures shared by the
//! quantizer and whatever consumes its output:
//!
//! - [`Rgb`] - An 8-bit per channel RGB color value
//! - [`Frame`] - A row-major buffer of RGB pixels (one video frame)
//! - [`PixelSource`] - The pixel access contract a quantizer reads from
//! - [`Palette`] - A bounded, ordered list of colors
//! - [`IndexedFrame`] - A palette plus one palette index per pixel
//!
//! # Example
//!
//! ```
//! use framequant_core::{Frame, Rgb};
//!
//! let mut frame = Frame::new(4, 2).unwrap();
//! frame.set_pixel(1, 1, Rgb::new(255, 0, 0)).unwrap();
//! assert_eq!(frame.num_pixels(), 8);
//! assert_eq!(frame.count_colors(), 2);
//! ```

pub mod color;
pub mod error;
pub mod frame;
pub mod indexed;
pub mod palette;

pub use color::Rgb;
pub use error::{Error, Result};
pub use frame::{Frame, PixelSource};
pub use indexed::IndexedFrame;
pub use palette::{MAX_PALETTE_COLORS, Palette};
