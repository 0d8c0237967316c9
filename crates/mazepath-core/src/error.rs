use thiserror::Error;

use crate::geom::Pos;

/// Smallest grid or maze side that can hold a one-cell interior.
pub const MIN_SIZE: i32 = 3;

/// Errors raised by grid construction and cell access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A dimension is below [`MIN_SIZE`].
    #[error("invalid size {0}: grid dimensions must be at least {MIN_SIZE}")]
    InvalidSize(i32),
    /// A position lies outside `[0, size)` on some axis.
    #[error("position {pos} is outside a {size}x{size} grid")]
    OutOfBounds { pos: Pos, size: i32 },
}
