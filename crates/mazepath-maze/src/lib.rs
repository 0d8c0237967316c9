//! Maze generation for mazepath grids.
//!
//! [`generate_maze`] produces a seeded [`Maze`] of walls and paths whose
//! paths form a spanning tree, with one entrance in the top row and one exit
//! in the bottom row. [`new_maze_grid`] turns it into a [`mazepath_core::Grid`]
//! with walls as barriers.

pub mod grid;
pub mod mazegen;

pub use grid::{grid_from_maze, new_maze_grid, new_maze_grid_with};
pub use mazegen::{Maze, MazeGen, MazeTile, generate_maze};
