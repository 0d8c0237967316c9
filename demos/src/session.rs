//! An editing session: the caller-side workflow around a grid.
//!
//! Painting follows the usual point-and-click rules: the first painted cell
//! becomes the start, the second the end, and every later one a barrier.
//! Erasing a cell empties it and forgets it as an endpoint.

use std::ops::ControlFlow;

use mazepath_core::{CellState, Grid, GridError, Pos};
use mazepath_maze::new_maze_grid;
use mazepath_paths::{Algorithm, SearchError, SearchOutcome, Step, search};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("a search needs both a start and an end")]
    MissingEndpoints,
}

/// What a call to [`Session::paint`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Painted {
    Start,
    End,
    Barrier,
    /// The cell is already an endpoint; nothing changed.
    Nothing,
}

pub struct Session {
    grid: Grid,
    start: Option<Pos>,
    end: Option<Pos>,
    maze_seed: Option<u64>,
}

impl Session {
    /// An empty `n`×`n` session.
    pub fn new(n: i32) -> Result<Self, SessionError> {
        Ok(Self {
            grid: Grid::new(n)?,
            start: None,
            end: None,
            maze_seed: None,
        })
    }

    /// An `n`×`n` session whose barriers come from a seeded maze.
    pub fn with_maze(n: i32, seed: u64) -> Result<Self, SessionError> {
        Ok(Self {
            grid: new_maze_grid(n, seed)?,
            start: None,
            end: None,
            maze_seed: Some(seed),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Paint `p`: start first, then end, then barriers.
    pub fn paint(&mut self, p: Pos) -> Result<Painted, SessionError> {
        // Bounds first so a failed paint leaves the session untouched.
        self.grid.cell(p)?;
        if self.start.is_none() && self.end != Some(p) {
            self.grid.set_state(p, CellState::Start)?;
            self.start = Some(p);
            Ok(Painted::Start)
        } else if self.end.is_none() && self.start != Some(p) {
            self.grid.set_state(p, CellState::End)?;
            self.end = Some(p);
            Ok(Painted::End)
        } else if self.start != Some(p) && self.end != Some(p) {
            self.grid.set_state(p, CellState::Barrier)?;
            Ok(Painted::Barrier)
        } else {
            Ok(Painted::Nothing)
        }
    }

    /// Reset `p` to empty, forgetting it if it was an endpoint.
    pub fn erase(&mut self, p: Pos) -> Result<(), SessionError> {
        self.grid.set_state(p, CellState::Empty)?;
        if self.start == Some(p) {
            self.start = None;
        } else if self.end == Some(p) {
            self.end = None;
        }
        Ok(())
    }

    /// Start over with a fresh grid of the same size. Maze sessions get the
    /// same maze back.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let n = self.grid.size();
        self.grid = match self.maze_seed {
            Some(seed) => new_maze_grid(n, seed)?,
            None => Grid::new(n)?,
        };
        self.start = None;
        self.end = None;
        Ok(())
    }

    /// Clear earlier search marks, refresh adjacency and search.
    pub fn run<F>(&mut self, algorithm: Algorithm, on_step: F) -> Result<SearchOutcome, SessionError>
    where
        F: FnMut(Step<'_>) -> ControlFlow<()>,
    {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            log::warn!("{algorithm}: refusing to search without both endpoints");
            return Err(SessionError::MissingEndpoints);
        };
        self.grid.clear_search();
        self.grid.recompute_neighbors();
        let outcome = search(algorithm, &mut self.grid, start, end, on_step).inspect_err(|e| {
            log::warn!("{algorithm} {start} -> {end} rejected: {e}");
        })?;
        log::info!("{algorithm} {start} -> {end}: {outcome}");
        Ok(outcome)
    }
}
