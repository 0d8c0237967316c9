//! **mazepath-core**: the grid model shared by the mazepath crates.
//!
//! A [`Grid`] is a square matrix of [`Cell`]s. Each cell carries a
//! [`CellState`] tag and a cached list of passable, orthogonally adjacent
//! neighbours. The searches in `mazepath-paths` walk those lists and the
//! maze generator in `mazepath-maze` seeds barriers.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellState};
pub use error::{GridError, MIN_SIZE};
pub use geom::Pos;
pub use grid::Grid;
