//! Search entry point, outcomes, validation and the step hook.

use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use mazepath_core::{Grid, GridError, Pos};
use thiserror::Error;

use crate::{astar, bfs};

/// Sentinel "infinite" score for cells not reached yet.
pub const UNREACHABLE: u32 = u32::MAX;

/// Which part of a search is calling the step hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    /// One cell was expanded (A*) or dequeued (BFS).
    Explore,
    /// One cell of the final route was marked `Path`.
    Reconstruct,
}

/// What the step hook is shown after each step.
///
/// The searching engine holds the grid mutably, so observers cannot keep
/// their own reference to it; the engine lends it here instead.
#[derive(Copy, Clone, Debug)]
pub struct Step<'a> {
    pub phase: SearchPhase,
    /// The cell just expanded, or just marked `Path`.
    pub pos: Pos,
    pub grid: &'a Grid,
}

/// Result of a search that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// `end` was reached. `path` runs from `start` to `end` inclusive.
    Found { path: Vec<Pos> },
    /// The frontier emptied without reaching `end`.
    Exhausted,
    /// The step hook asked to stop during exploration.
    Aborted,
}

impl SearchOutcome {
    /// Whether a route was found.
    pub fn found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The route, if one was found.
    pub fn path(&self) -> Option<&[Pos]> {
        match self {
            Self::Found { path } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { path } => write!(f, "found a {}-cell path", path.len()),
            Self::Exhausted => f.write_str("no path"),
            Self::Aborted => f.write_str("aborted"),
        }
    }
}

/// Misuse detected before a search touches the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// An endpoint lies outside the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("start and end are the same cell {0}")]
    SameEndpoints(Pos),
    #[error("endpoint {0} is a barrier")]
    BlockedEndpoint(Pos),
    #[error("neighbour lists are stale; recompute them before searching")]
    StaleNeighbors,
}

/// The available search algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    AStar,
    Bfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::AStar, Algorithm::Bfs];

    pub const fn name(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Bfs => "bfs",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?}, expected \"astar\" or \"bfs\"")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "bfs" => Ok(Self::Bfs),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Run `algorithm` from `start` to `end`, marking cells as it goes.
///
/// `on_step` is called synchronously once per exploration step and once per
/// reconstructed route cell. Returning [`ControlFlow::Break`] during
/// exploration stops the search with [`SearchOutcome::Aborted`].
pub fn search<F>(
    algorithm: Algorithm,
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    on_step: F,
) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(Step<'_>) -> ControlFlow<()>,
{
    match algorithm {
        Algorithm::AStar => astar::astar(grid, start, end, on_step),
        Algorithm::Bfs => bfs::bfs(grid, start, end, on_step),
    }
}

/// A step hook that does nothing.
pub fn no_step(_: Step<'_>) -> ControlFlow<()> {
    ControlFlow::Continue(())
}

/// A step hook that aborts the search on its `max_steps`-th exploration step.
pub fn step_limit(max_steps: usize) -> impl FnMut(Step<'_>) -> ControlFlow<()> {
    let mut taken = 0usize;
    move |step: Step<'_>| {
        if step.phase == SearchPhase::Explore {
            taken += 1;
            if taken >= max_steps {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

/// Check the endpoints and adjacency, returning their flat indices.
pub(crate) fn validate(grid: &Grid, start: Pos, end: Pos) -> Result<(usize, usize), SearchError> {
    let start_cell = grid.cell(start)?;
    let end_cell = grid.cell(end)?;
    if start == end {
        return Err(SearchError::SameEndpoints(start));
    }
    if start_cell.is_barrier() {
        return Err(SearchError::BlockedEndpoint(start));
    }
    if end_cell.is_barrier() {
        return Err(SearchError::BlockedEndpoint(end));
    }
    if grid.neighbors_stale() {
        return Err(SearchError::StaleNeighbors);
    }
    let si = grid.index(start).ok_or(GridError::OutOfBounds {
        pos: start,
        size: grid.size(),
    })?;
    let ei = grid.index(end).ok_or(GridError::OutOfBounds {
        pos: end,
        size: grid.size(),
    })?;
    Ok((si, ei))
}

/// Wraps the caller's hook. Once the hook breaks it is never called again.
pub(crate) struct StepHook<F> {
    on_step: F,
    silenced: bool,
    pub(crate) explored: usize,
}

impl<F> StepHook<F>
where
    F: FnMut(Step<'_>) -> ControlFlow<()>,
{
    pub(crate) fn new(on_step: F) -> Self {
        Self {
            on_step,
            silenced: false,
            explored: 0,
        }
    }

    pub(crate) fn explore(&mut self, grid: &Grid, pos: Pos) -> ControlFlow<()> {
        self.explored += 1;
        self.call(Step {
            phase: SearchPhase::Explore,
            pos,
            grid,
        })
    }

    /// Break during reconstruction only silences the hook; the route is
    /// already known and still gets marked.
    pub(crate) fn reconstruct(&mut self, grid: &Grid, pos: Pos) {
        let _ = self.call(Step {
            phase: SearchPhase::Reconstruct,
            pos,
            grid,
        });
    }

    fn call(&mut self, step: Step<'_>) -> ControlFlow<()> {
        if self.silenced {
            return ControlFlow::Break(());
        }
        let flow = (self.on_step)(step);
        if flow.is_break() {
            self.silenced = true;
        }
        flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazepath_core::CellState;

    fn ready_grid(n: i32) -> Grid {
        let mut g = Grid::new(n).unwrap();
        g.recompute_neighbors();
        g
    }

    #[test]
    fn parse_algorithm() {
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert!("dijkstra".parse::<Algorithm>().is_err());
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse::<Algorithm>(), Ok(a));
        }
    }

    #[test]
    fn rejects_out_of_bounds() {
        let mut g = ready_grid(5);
        for algo in Algorithm::ALL {
            let err = search(algo, &mut g, Pos::new(0, 0), Pos::new(5, 0), no_step).unwrap_err();
            assert!(matches!(err, SearchError::Grid(GridError::OutOfBounds { .. })));
        }
    }

    #[test]
    fn rejects_same_endpoints() {
        let mut g = ready_grid(5);
        let p = Pos::new(2, 2);
        for algo in Algorithm::ALL {
            assert_eq!(
                search(algo, &mut g, p, p, no_step),
                Err(SearchError::SameEndpoints(p))
            );
        }
    }

    #[test]
    fn rejects_blocked_endpoints() {
        let mut g = Grid::new(5).unwrap();
        g.set_state(Pos::new(4, 4), CellState::Barrier).unwrap();
        g.recompute_neighbors();
        for algo in Algorithm::ALL {
            assert_eq!(
                search(algo, &mut g, Pos::new(0, 0), Pos::new(4, 4), no_step),
                Err(SearchError::BlockedEndpoint(Pos::new(4, 4)))
            );
        }
    }

    #[test]
    fn rejects_stale_neighbors_without_mutating() {
        let mut g = ready_grid(5);
        g.set_state(Pos::new(2, 2), CellState::Barrier).unwrap();
        for algo in Algorithm::ALL {
            assert_eq!(
                search(algo, &mut g, Pos::new(0, 0), Pos::new(4, 4), no_step),
                Err(SearchError::StaleNeighbors)
            );
        }
        assert_eq!(g.count(CellState::Empty), 24);
    }

    #[test]
    fn step_limit_aborts_exploration() {
        for algo in Algorithm::ALL {
            let mut g = ready_grid(10);
            let outcome = search(algo, &mut g, Pos::new(0, 0), Pos::new(9, 9), step_limit(3)).unwrap();
            assert_eq!(outcome, SearchOutcome::Aborted);
            assert!(!outcome.found());
            assert_eq!(g.count(CellState::Path), 0);
        }
    }

    #[test]
    fn hook_sees_both_phases() {
        for algo in Algorithm::ALL {
            let mut g = ready_grid(5);
            let mut explore = 0;
            let mut reconstruct = 0;
            let outcome = search(algo, &mut g, Pos::new(0, 0), Pos::new(0, 4), |step| {
                match step.phase {
                    SearchPhase::Explore => explore += 1,
                    SearchPhase::Reconstruct => reconstruct += 1,
                }
                ControlFlow::Continue(())
            })
            .unwrap();
            assert!(outcome.found());
            assert!(explore > 0);
            // One call per intermediate route cell.
            assert_eq!(reconstruct, 3);
        }
    }

    #[test]
    fn break_during_reconstruction_still_marks_route() {
        let mut g = ready_grid(5);
        let outcome = search(Algorithm::Bfs, &mut g, Pos::new(0, 0), Pos::new(4, 4), |step| {
            if step.phase == SearchPhase::Reconstruct {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert!(outcome.found());
        assert_eq!(g.count(CellState::Path), 7);
    }

    #[test]
    fn hook_sees_current_marks() {
        let mut g = ready_grid(4);
        let mut route = Vec::new();
        let outcome = search(Algorithm::AStar, &mut g, Pos::new(0, 0), Pos::new(3, 0), |step| {
            let state = step.grid.state(step.pos).unwrap();
            match step.phase {
                SearchPhase::Explore if step.pos != Pos::new(0, 0) => {
                    assert_eq!(state, CellState::Closed)
                }
                SearchPhase::Explore => {}
                SearchPhase::Reconstruct => {
                    assert_eq!(state, CellState::Path);
                    route.push(step.pos);
                }
            }
            ControlFlow::Continue(())
        })
        .unwrap();
        assert!(outcome.found());
        // Reconstruction walks backwards from the end.
        assert_eq!(route, vec![Pos::new(2, 0), Pos::new(1, 0)]);
    }

    #[test]
    fn outcome_display() {
        let found = SearchOutcome::Found {
            path: vec![Pos::new(0, 0), Pos::new(0, 1)],
        };
        assert_eq!(found.to_string(), "found a 2-cell path");
        assert_eq!(found.path().map(<[Pos]>::len), Some(2));
        assert_eq!(SearchOutcome::Exhausted.to_string(), "no path");
        assert_eq!(SearchOutcome::Aborted.path(), None);
    }
}
