//! The [`Cell`] type and its [`CellState`] tag.

use crate::geom::Pos;

/// What a cell currently represents.
///
/// The tag is both the semantic marker used by the searches and, in a view
/// layer, the key for choosing a colour. The core never looks at colours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// On a search frontier.
    Open,
    /// Visited by a search.
    Closed,
    /// Part of a reconstructed route.
    Path,
}

impl CellState {
    /// Whether the state blocks movement.
    #[inline]
    pub const fn is_barrier(self) -> bool {
        matches!(self, Self::Barrier)
    }

    /// Whether the state was produced by a search (Open, Closed or Path).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Single-character representation used by `Display` impls.
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Barrier => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Path => '*',
        }
    }
}

/// One grid position, its state, and its passable neighbours.
///
/// Neighbour lists are positions into the owning grid. They are only as
/// fresh as the last [`Grid::recompute_neighbors`](crate::Grid::recompute_neighbors).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    pub(crate) state: CellState,
    pub(crate) neighbors: Vec<Pos>,
}

impl Cell {
    pub(crate) fn new(pos: Pos) -> Self {
        Self {
            pos,
            state: CellState::Empty,
            neighbors: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Passable neighbours as of the last adjacency pass.
    #[inline]
    pub fn neighbors(&self) -> &[Pos] {
        &self.neighbors
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state.is_barrier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty() {
        let c = Cell::new(Pos::new(1, 2));
        assert_eq!(c.state(), CellState::Empty);
        assert_eq!((c.row(), c.col()), (1, 2));
        assert!(c.neighbors().is_empty());
    }

    #[test]
    fn search_marks() {
        assert!(CellState::Open.is_search_mark());
        assert!(CellState::Closed.is_search_mark());
        assert!(CellState::Path.is_search_mark());
        assert!(!CellState::Start.is_search_mark());
        assert!(!CellState::Barrier.is_search_mark());
    }
}
