//! Error taxonomy for grid construction and cell addressing.

use thiserror::Error;

/// Errors reported by the grid engine.
///
/// `tick` never fails for a validly constructed grid; the fallible
/// operations are construction and anything that takes a coordinate,
/// which reject bad input instead of wrapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Construction was asked for a zero-sized grid. Never clamped.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// A coordinate fell outside `[0, height) x [0, width)`.
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: u32, col: u32 },
}
