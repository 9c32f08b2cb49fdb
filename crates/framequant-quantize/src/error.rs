//! Error types for framequant-quantize

use thiserror::Error;

/// Errors that can occur during quantization
#[derive(Debug, Error)]
pub enum QuantizeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] framequant_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Empty frame
    #[error("empty frame: no pixels to process")]
    EmptyFrame,

    /// Pixel lookup requested before palette indices were assigned
    #[error("color palette has not been extracted yet")]
    PaletteNotExtracted,
}

/// Result type for quantization operations
pub type QuantizeResult<T> = Result<T, QuantizeError>;
