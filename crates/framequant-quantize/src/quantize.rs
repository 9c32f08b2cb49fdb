//! Frame quantization entry points
//!
//! One-call helpers that run the octree quantizer over a [`Frame`] and
//! package the palette and indices as an [`IndexedFrame`] for an encoder.

use crate::octree::OctreeColorQuantizer;
use crate::{QuantizeError, QuantizeResult};
use framequant_core::{Frame, IndexedFrame, MAX_PALETTE_COLORS};

/// Smallest palette limit the octree can always honor: reduction stops at
/// the root's children, of which there are at most eight.
const MIN_OCTREE_COLORS: u32 = 8;

/// Options for octree quantization
#[derive(Debug, Clone)]
pub struct OctreeOptions {
    /// Maximum number of colors in the output palette
    pub max_colors: u32,
}

impl Default for OctreeOptions {
    fn default() -> Self {
        Self {
            max_colors: MAX_PALETTE_COLORS as u32,
        }
    }
}

impl OctreeOptions {
    /// Check that `max_colors` is within `8..=256`.
    pub fn validate(&self) -> QuantizeResult<()> {
        if !(MIN_OCTREE_COLORS..=MAX_PALETTE_COLORS as u32).contains(&self.max_colors) {
            return Err(QuantizeError::InvalidParameters(format!(
                "max_colors must be between {MIN_OCTREE_COLORS} and {MAX_PALETTE_COLORS}; got {}",
                self.max_colors
            )));
        }
        Ok(())
    }
}

/// Quantize a frame using the octree algorithm.
///
/// Builds the tree from every pixel, extracts the palette, and maps every
/// pixel of the same frame to its palette index.
///
/// # Errors
///
/// - [`QuantizeError::InvalidParameters`] for an out-of-range `max_colors`
/// - [`QuantizeError::Core`] if the palette or the indexed frame cannot be
///   built; a successfully reduced tree never triggers this
pub fn octree_quant(frame: &Frame, options: &OctreeOptions) -> QuantizeResult<IndexedFrame> {
    let mut quantizer = OctreeColorQuantizer::with_options(frame, options)?;
    let palette = quantizer.color_palette()?;

    let mut indices = Vec::with_capacity(frame.num_pixels());
    quantizer.extract_pixel_color_indices(frame, &mut indices)?;

    Ok(IndexedFrame::new(
        frame.width(),
        frame.height(),
        palette,
        indices,
    )?)
}

/// Quantize to at most 256 colors using the octree
pub fn octree_quant_256(frame: &Frame) -> QuantizeResult<IndexedFrame> {
    octree_quant(frame, &OctreeOptions::default())
}
