use std::collections::VecDeque;
use std::ops::ControlFlow;

use mazepath_core::{CellState, Grid, Pos};

use crate::reconstruct::{Trail, reconstruct_path};
use crate::search::{SearchError, SearchOutcome, Step, StepHook, validate};

/// Shortest path from `start` to `end` using breadth-first search.
///
/// Cells are marked `Closed` when they are discovered rather than when they
/// are dequeued. On success the route is marked `Path`.
pub fn bfs<F>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    on_step: F,
) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(Step<'_>) -> ControlFlow<()>,
{
    let (start_idx, end_idx) = validate(grid, start, end)?;
    let len = grid.len();

    let mut visited = vec![false; len];
    let mut trail = Trail::new(len);
    let mut hook = StepHook::new(on_step);

    let mut queue: VecDeque<usize> = VecDeque::new();
    visited[start_idx] = true;
    queue.push_back(start_idx);

    let mut nbuf: Vec<Pos> = Vec::with_capacity(4);

    while let Some(ci) = queue.pop_front() {
        if ci == end_idx {
            let path = reconstruct_path(grid, &trail, start_idx, end_idx, &mut hook)?;
            let outcome = SearchOutcome::Found { path };
            log::debug!("bfs {start} -> {end}: {outcome} after {} dequeues", hook.explored);
            return Ok(outcome);
        }

        let cp = grid.pos(ci);
        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(cp)?);

        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if visited[ni] {
                continue;
            }
            trail.link(ni, ci);
            visited[ni] = true;
            if ni != end_idx {
                grid.set_state(np, CellState::Closed)?;
            }
            queue.push_back(ni);
        }

        if hook.explore(grid, cp).is_break() {
            log::debug!("bfs {start} -> {end}: aborted after {} dequeues", hook.explored);
            return Ok(SearchOutcome::Aborted);
        }
    }

    log::debug!("bfs {start} -> {end}: no path after {} dequeues", hook.explored);
    Ok(SearchOutcome::Exhausted)
}
