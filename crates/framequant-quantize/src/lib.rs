//! Framequant Quantize - Palette quantization for video frames
//!
//! This crate reduces a true-color frame to at most 256 colors and maps
//! every pixel to a palette index:
//!
//! - **Octree quantizer** ([`octree`]): [`OctreeColorQuantizer`] builds an
//!   8-level octree over the RGB cube and merges the least-populated
//!   clusters first
//! - **Entry points** ([`quantize`]): one-call quantization of a [`Frame`]
//!   into an [`IndexedFrame`]
//!
//! # Example
//!
//! ```
//! use framequant_core::{Frame, Palette, Rgb};
//! use framequant_quantize::OctreeColorQuantizer;
//!
//! let frame = Frame::from_pixels(2, 1, vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
//! let mut quantizer = OctreeColorQuantizer::new(&frame).unwrap();
//!
//! let mut palette = Palette::new();
//! quantizer.extract_color_palette(&mut palette).unwrap();
//! assert_eq!(palette.len(), 2);
//!
//! let mut indices = Vec::new();
//! quantizer.extract_pixel_color_indices(&frame, &mut indices).unwrap();
//! assert_eq!(palette.get(indices[1] as usize), Some(Rgb::WHITE));
//! ```
//!
//! [`Frame`]: framequant_core::Frame
//! [`IndexedFrame`]: framequant_core::IndexedFrame

pub mod error;
pub mod octree;
pub mod quantize;

// Re-export core types
pub use framequant_core;

// Re-export error types
pub use error::{QuantizeError, QuantizeResult};

// Re-export quantization types and functions
pub use octree::{BITS_PER_CHANNEL, OctreeColorQuantizer};
pub use quantize::{
    // Types
    OctreeOptions,
    // Functions
    octree_quant,
    octree_quant_256,
};
