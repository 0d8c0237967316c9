//! Randomized wall-growing maze generation.
//!
//! The maze starts from a single random interior cell and grows by carving
//! frontier walls that separate an undetermined cell from the maze. A wall
//! is only carved when it touches a single path cell, so the passable cells
//! always form a tree. Afterwards an entrance is opened in the top row and
//! an exit in the bottom row.

use std::fmt;

use mazepath_core::{GridError, MIN_SIZE, Pos};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

/// A resolved maze cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MazeTile {
    Wall,
    Path,
}

/// Intermediate marker used while the maze grows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Undetermined,
    Wall,
    Path,
}

/// Carving directions, checked in this order. Each is the offset of the
/// cell that must still be undetermined; the opposite cell must be path.
const DIRS: [Pos; 4] = [
    Pos::new(0, -1), // left
    Pos::new(-1, 0), // up
    Pos::new(1, 0),  // down
    Pos::new(0, 1),  // right
];

/// A generated `height`×`width` maze, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Maze {
    height: i32,
    width: i32,
    tiles: Vec<MazeTile>,
}

impl Maze {
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.height && p.col < self.width
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Pos) -> Option<MazeTile> {
        if !self.contains(p) {
            return None;
        }
        Some(self.tiles[(p.row * self.width + p.col) as usize])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[MazeTile]> {
        self.tiles.chunks(self.width as usize)
    }

    /// The matrix as `height` vectors of `width` tiles.
    pub fn to_rows(&self) -> Vec<Vec<MazeTile>> {
        self.rows().map(<[MazeTile]>::to_vec).collect()
    }

    /// Iterate over `(Pos, MazeTile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, MazeTile)> + '_ {
        let w = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &t)| (Pos::new(i as i32 / w, i as i32 % w), t))
    }

    /// Count tiles of the given kind.
    pub fn count(&self, tile: MazeTile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// The opening in the top row, if any.
    pub fn entrance(&self) -> Option<Pos> {
        (0..self.width)
            .map(|col| Pos::new(0, col))
            .find(|&p| self.at(p) == Some(MazeTile::Path))
    }

    /// The opening in the bottom row, if any.
    pub fn exit(&self) -> Option<Pos> {
        (0..self.width)
            .map(|col| Pos::new(self.height - 1, col))
            .find(|&p| self.at(p) == Some(MazeTile::Path))
    }
}

impl fmt::Display for Maze {
    /// `#` for walls, `.` for paths, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for t in row {
                let ch = match t {
                    MazeTile::Wall => '#',
                    MazeTile::Path => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Generate a `height`×`width` maze from a seed.
///
/// The same `(height, width, seed)` always yields the same maze.
pub fn generate_maze(height: i32, width: i32, seed: u64) -> Result<Maze, GridError> {
    MazeGen::new(StdRng::seed_from_u64(seed)).generate(height, width)
}

/// Maze generator driven by a caller-supplied RNG.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a perfect maze with one entrance (top row) and one exit
    /// (bottom row).
    pub fn generate(&mut self, height: i32, width: i32) -> Result<Maze, GridError> {
        if height < MIN_SIZE {
            return Err(GridError::InvalidSize(height));
        }
        if width < MIN_SIZE {
            return Err(GridError::InvalidSize(width));
        }

        let mut carver = Carver::new(height, width);
        let seed = Pos::new(
            self.rng.random_range(1..=height - 2),
            self.rng.random_range(1..=width - 2),
        );
        carver.set(seed, Mark::Path);
        // Up, left, right, down.
        for d in [Pos::new(-1, 0), Pos::new(0, -1), Pos::new(0, 1), Pos::new(1, 0)] {
            let n = seed + d;
            carver.set(n, Mark::Wall);
            carver.push_frontier(n);
        }

        let mut carved = 1usize;
        while !carver.frontier.is_empty() {
            let i = self.rng.random_range(0..carver.frontier.len());
            let wall = carver.take_frontier(i);
            if carver.try_carve(wall) {
                carved += 1;
            }
        }

        let maze = carver.finish();
        log::trace!(
            "generated {height}x{width} maze from {seed}: {carved} carved, entrance {:?}, exit {:?}",
            maze.entrance(),
            maze.exit()
        );
        Ok(maze)
    }
}

/// Working state for one generation run.
struct Carver {
    height: i32,
    width: i32,
    marks: Vec<Mark>,
    frontier: Vec<Pos>,
    in_frontier: Vec<bool>,
}

impl Carver {
    fn new(height: i32, width: i32) -> Self {
        let len = (height * width) as usize;
        Self {
            height,
            width,
            marks: vec![Mark::Undetermined; len],
            frontier: Vec::new(),
            in_frontier: vec![false; len],
        }
    }

    #[inline]
    fn idx(&self, p: Pos) -> Option<usize> {
        if p.row < 0 || p.col < 0 || p.row >= self.height || p.col >= self.width {
            return None;
        }
        Some((p.row * self.width + p.col) as usize)
    }

    #[inline]
    fn mark(&self, p: Pos) -> Option<Mark> {
        self.idx(p).map(|i| self.marks[i])
    }

    fn set(&mut self, p: Pos, m: Mark) {
        if let Some(i) = self.idx(p) {
            self.marks[i] = m;
        }
    }

    fn push_frontier(&mut self, p: Pos) {
        let Some(i) = self.idx(p) else {
            return;
        };
        if !self.in_frontier[i] {
            self.in_frontier[i] = true;
            self.frontier.push(p);
        }
    }

    fn take_frontier(&mut self, i: usize) -> Pos {
        let p = self.frontier.swap_remove(i);
        if let Some(fi) = self.idx(p) {
            self.in_frontier[fi] = false;
        }
        p
    }

    fn paths_around(&self, p: Pos) -> usize {
        p.neighbors_4()
            .into_iter()
            .filter(|&n| self.mark(n) == Some(Mark::Path))
            .count()
    }

    /// Carve `wall` if it separates an undetermined cell from the maze.
    ///
    /// Only the first matching direction is considered. Returns whether a
    /// new path cell was made.
    fn try_carve(&mut self, wall: Pos) -> bool {
        if self.mark(wall) != Some(Mark::Wall) {
            return false;
        }
        for d in DIRS {
            let ahead = wall + d;
            let behind = wall - d;
            if self.mark(ahead) != Some(Mark::Undetermined) || self.mark(behind) != Some(Mark::Path) {
                continue;
            }
            if self.paths_around(wall) >= 2 {
                return false;
            }
            self.set(wall, Mark::Path);
            for n in wall.neighbors_4() {
                if n == behind {
                    continue;
                }
                match self.mark(n) {
                    Some(Mark::Path) | None => {}
                    Some(_) => {
                        self.set(n, Mark::Wall);
                        self.push_frontier(n);
                    }
                }
            }
            return true;
        }
        false
    }

    /// Collapse to walls/paths and open the entrance and exit.
    fn finish(self) -> Maze {
        let mut tiles: Vec<MazeTile> = self
            .marks
            .iter()
            .map(|m| match m {
                Mark::Path => MazeTile::Path,
                Mark::Wall | Mark::Undetermined => MazeTile::Wall,
            })
            .collect();

        let w = self.width as usize;
        let top = w;
        if let Some(col) = (0..w).find(|&c| tiles[top + c] == MazeTile::Path) {
            tiles[col] = MazeTile::Path;
        }
        let bottom = (self.height as usize - 2) * w;
        if let Some(col) = (1..w).rev().find(|&c| tiles[bottom + c] == MazeTile::Path) {
            tiles[bottom + w + col] = MazeTile::Path;
        }

        Maze {
            height: self.height,
            width: self.width,
            tiles,
        }
    }
}
