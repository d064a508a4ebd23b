//! Error types for the lava-lamp core.
//!
//! Only construction and I/O can fail. Once an engine is built, rendering a
//! frame never returns an error.

use thiserror::Error;

/// Errors produced while building engines, surfaces, and fill styles.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or their product overflowed) for a viewport,
    /// raster, or lattice.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No engine is registered under the requested name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// Writing an image or other output failed.
    #[error("i/o error: {0}")]
    Io(String),
}
