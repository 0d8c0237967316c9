//! Grids seeded from a generated maze.

use mazepath_core::{CellState, Grid, GridError};
use rand::Rng;

use crate::mazegen::{Maze, MazeGen, MazeTile, generate_maze};

/// Create an `n`×`n` grid whose barriers are the walls of
/// `generate_maze(n, n, seed)`.
pub fn new_maze_grid(n: i32, seed: u64) -> Result<Grid, GridError> {
    let maze = generate_maze(n, n, seed)?;
    grid_from_maze(&maze)
}

/// Like [`new_maze_grid`] but drawing from a caller-supplied RNG.
pub fn new_maze_grid_with<R: Rng>(n: i32, generator: &mut MazeGen<R>) -> Result<Grid, GridError> {
    let maze = generator.generate(n, n)?;
    grid_from_maze(&maze)
}

/// Convert a square maze into a grid: walls become `Barrier`, paths `Empty`.
///
/// Neighbour lists are left stale; recompute them before searching.
pub fn grid_from_maze(maze: &Maze) -> Result<Grid, GridError> {
    if maze.height() != maze.width() {
        return Err(GridError::InvalidSize(maze.height().min(maze.width())));
    }
    let mut grid = Grid::new(maze.height())?;
    for (p, tile) in maze.iter() {
        if tile == MazeTile::Wall {
            grid.set_state(p, CellState::Barrier)?;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazepath_core::Pos;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn barriers_match_walls() {
        let maze = generate_maze(9, 9, 3).unwrap();
        let grid = new_maze_grid(9, 3).unwrap();
        for cell in grid.cells() {
            let expected = match maze.at(cell.pos()) {
                Some(MazeTile::Wall) => CellState::Barrier,
                _ => CellState::Empty,
            };
            assert_eq!(cell.state(), expected, "at {}", cell.pos());
        }
        assert_eq!(grid.count(CellState::Empty), maze.count(MazeTile::Path));
        assert!(grid.neighbors_stale());
    }

    #[test]
    fn rejects_small_size() {
        assert_eq!(new_maze_grid(2, 0).unwrap_err(), GridError::InvalidSize(2));
    }

    #[test]
    fn rejects_non_square_maze() {
        let maze = generate_maze(5, 7, 0).unwrap();
        assert!(grid_from_maze(&maze).is_err());
    }

    #[test]
    fn custom_generator() {
        let mut generator = MazeGen::new(StdRng::seed_from_u64(11));
        let grid = new_maze_grid_with(7, &mut generator).unwrap();
        assert_eq!(grid.size(), 7);
        assert_eq!(grid.state(Pos::new(0, 0)), Ok(CellState::Barrier));
        assert_eq!(grid.to_string(), new_maze_grid(7, 11).unwrap().to_string());
    }
}
