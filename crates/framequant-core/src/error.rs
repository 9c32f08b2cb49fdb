//! Error types for framequant-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Framequant core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid frame dimensions
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffer length does not match the frame dimensions
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Palette already holds the maximum number of colors
    #[error("palette is full: at most {max} colors")]
    PaletteFull { max: usize },

    /// A pixel refers to a palette entry that does not exist
    #[error("palette index out of range: {index} >= {len}")]
    PaletteIndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for framequant-core operations
pub type Result<T> = std::result::Result<T, Error>;
