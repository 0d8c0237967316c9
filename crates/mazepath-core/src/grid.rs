//! The [`Grid`] type: an N×N matrix of [`Cell`]s with 4-way adjacency.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::error::{GridError, MIN_SIZE};
use crate::geom::Pos;

/// A square grid of cells stored row-major.
///
/// Adjacency is cached per cell and is **not** kept in sync with state edits.
/// Call [`recompute_neighbors`](Grid::recompute_neighbors) after painting
/// barriers and before searching; [`neighbors_stale`](Grid::neighbors_stale)
/// reports whether that pass is due.
#[derive(Clone, Debug)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    stale: bool,
}

impl Grid {
    /// Create an `n`×`n` grid of empty cells.
    pub fn new(n: i32) -> Result<Self, GridError> {
        if n < MIN_SIZE {
            return Err(GridError::InvalidSize(n));
        }
        let mut cells = Vec::with_capacity((n * n) as usize);
        for row in 0..n {
            for col in 0..n {
                cells.push(Cell::new(Pos::new(row, col)));
            }
        }
        Ok(Self {
            size: n,
            cells,
            stale: true,
        })
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least `MIN_SIZE`² cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.size && p.col < self.size
    }

    /// Row-major flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.row * self.size + p.col) as usize)
    }

    /// Position of a flat index produced by [`index`](Grid::index).
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let n = self.size as usize;
        Pos::new((idx / n) as i32, (idx % n) as i32)
    }

    fn checked_index(&self, p: Pos) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            size: self.size,
        })
    }

    /// The cell at `p`.
    pub fn cell(&self, p: Pos) -> Result<&Cell, GridError> {
        let i = self.checked_index(p)?;
        Ok(&self.cells[i])
    }

    /// The state at `p`.
    pub fn state(&self, p: Pos) -> Result<CellState, GridError> {
        self.cell(p).map(Cell::state)
    }

    /// Set the state at `p` and return the previous one.
    ///
    /// No validation beyond bounds: placing `Start` on a barrier is allowed.
    /// Changing whether the cell is a barrier marks adjacency stale.
    pub fn set_state(&mut self, p: Pos, state: CellState) -> Result<CellState, GridError> {
        let i = self.checked_index(p)?;
        let prev = std::mem::replace(&mut self.cells[i].state, state);
        if prev.is_barrier() != state.is_barrier() {
            self.stale = true;
        }
        Ok(prev)
    }

    /// Passable neighbours of `p` as of the last adjacency pass.
    pub fn neighbors(&self, p: Pos) -> Result<&[Pos], GridError> {
        self.cell(p).map(Cell::neighbors)
    }

    /// Rebuild every cell's neighbour list from the current barriers.
    ///
    /// A neighbour is one of the four grid-adjacent positions that is in
    /// bounds and not a barrier.
    pub fn recompute_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let p = self.cells[i].pos();
            let mut nbrs = std::mem::take(&mut self.cells[i].neighbors);
            nbrs.clear();
            for n in p.neighbors_4() {
                let Some(ni) = self.index(n) else {
                    continue;
                };
                if !self.cells[ni].is_barrier() {
                    nbrs.push(n);
                }
            }
            self.cells[i].neighbors = nbrs;
        }
        self.stale = false;
    }

    /// Whether a barrier edit happened since the last adjacency pass.
    #[inline]
    pub fn neighbors_stale(&self) -> bool {
        self.stale
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.cells.iter()
    }

    /// First position (row-major) holding `state`.
    pub fn find(&self, state: CellState) -> Option<Pos> {
        self.cells.iter().find(|c| c.state == state).map(Cell::pos)
    }

    /// Count how many cells hold `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        for c in self.cells.iter_mut() {
            c.state = CellState::Empty;
        }
        self.stale = true;
    }

    /// Reset search marks (Open, Closed, Path) to `Empty`, keeping barriers
    /// and endpoints. Adjacency is unaffected.
    pub fn clear_search(&mut self) {
        for c in self.cells.iter_mut() {
            if c.state.is_search_mark() {
                c.state = CellState::Empty;
            }
        }
    }
}

impl fmt::Display for Grid {
    /// One line per row, one [`CellState::symbol`] per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size as usize) {
            for c in row {
                write!(f, "{}", c.state.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
