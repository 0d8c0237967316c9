//! Shortest-path searches over a [`mazepath_core::Grid`].
//!
//! - **A\*** with a Manhattan heuristic and insertion-order tie-breaking ([`astar`])
//! - **Breadth-first search** ([`bfs`])
//!
//! Both walk the grid's cached neighbour lists, mark cells as they go
//! (`Open`, `Closed`, then `Path` for the final route) and share one
//! reconstruction step. Per-search bookkeeping lives only for the duration
//! of the call.
//!
//! Searches are synchronous. The optional step hook is called on the
//! caller's thread between steps; it can stop exploration by returning
//! [`ControlFlow::Break`](std::ops::ControlFlow::Break), which yields
//! [`SearchOutcome::Aborted`].

mod astar;
mod bfs;
mod reconstruct;
mod search;

pub use astar::astar;
pub use bfs::bfs;
pub use search::{
    Algorithm, ParseAlgorithmError, SearchError, SearchOutcome, SearchPhase, Step, UNREACHABLE,
    no_step, search, step_limit,
};
