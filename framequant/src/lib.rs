//! Framequant - Octree palette quantization for video frames
//!
//! Reduces one true-color frame to a palette of at most 256 colors and maps
//! every pixel to a palette index, ready for an indexed-color encoder.
//!
//! # Overview
//!
//! - Core data structures: [`Frame`], [`Rgb`], [`Palette`], [`IndexedFrame`]
//! - Octree quantization: [`quantize::OctreeColorQuantizer`],
//!   [`quantize::octree_quant`]
//!
//! # Example
//!
//! ```
//! use framequant::quantize::octree_quant_256;
//! use framequant::{Frame, Rgb};
//!
//! let frame = Frame::from_pixels(2, 2, vec![Rgb::BLACK, Rgb::WHITE, Rgb::WHITE, Rgb::BLACK])
//!     .unwrap();
//! let indexed = octree_quant_256(&frame).unwrap();
//! assert_eq!(indexed.palette().len(), 2);
//! assert_eq!(indexed.to_frame().unwrap(), frame);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use framequant_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use framequant_quantize as quantize;
