use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;

use mazepath_core::{CellState, Grid, Pos};

use crate::reconstruct::{Trail, reconstruct_path};
use crate::search::{SearchError, SearchOutcome, Step, StepHook, UNREACHABLE, validate};

/// A frontier entry, ordered for `BinaryHeap` so that the lowest
/// `(f, order)` pops first. `order` is the insertion counter, so cells with
/// equal scores leave in the order they arrived.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: u32,
    pub(crate) order: u64,
    pub(crate) idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Heuristic: Manhattan distance, admissible and consistent for unit-cost
/// 4-way movement.
#[inline]
fn estimate(from: Pos, to: Pos) -> u32 {
    from.manhattan(to).unsigned_abs()
}

/// Shortest path from `start` to `end` using A*.
///
/// Frontier cells are marked `Open`, expanded cells other than `start` are
/// marked `Closed`, and on success the route is marked `Path`.
pub fn astar<F>(
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

    let mut g_score = vec![UNREACHABLE; len];
    let mut f_score = vec![UNREACHABLE; len];
    // Membership set for the frontier.
    let mut queued = vec![false; len];
    let mut trail = Trail::new(len);
    let mut hook = StepHook::new(on_step);

    let mut order: u64 = 0;
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    g_score[start_idx] = 0;
    f_score[start_idx] = estimate(start, end);
    open.push(OpenEntry {
        f: f_score[start_idx],
        order,
        idx: start_idx,
    });
    queued[start_idx] = true;

    let mut nbuf: Vec<Pos> = Vec::with_capacity(4);

    while let Some(current) = open.pop() {
        let ci = current.idx;
        queued[ci] = false;

        if ci == end_idx {
            let path = reconstruct_path(grid, &trail, start_idx, end_idx, &mut hook)?;
            let outcome = SearchOutcome::Found { path };
            log::debug!("astar {start} -> {end}: {outcome} after {} expansions", hook.explored);
            return Ok(outcome);
        }

        let current_pos = grid.pos(ci);
        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(current_pos)?);

        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            let tentative_g = g_score[ci] + 1;
            if tentative_g >= g_score[ni] {
                continue;
            }
            trail.link(ni, ci);
            g_score[ni] = tentative_g;
            f_score[ni] = tentative_g + estimate(np, end);

            // A queued cell keeps its entry and original priority.
            if !queued[ni] {
                order += 1;
                open.push(OpenEntry {
                    f: f_score[ni],
                    order,
                    idx: ni,
                });
                queued[ni] = true;
                if ni != end_idx {
                    grid.set_state(np, CellState::Open)?;
                }
            }
        }

        if ci != start_idx {
            grid.set_state(current_pos, CellState::Closed)?;
        }

        if hook.explore(grid, current_pos).is_break() {
            log::debug!("astar {start} -> {end}: aborted after {} expansions", hook.explored);
            return Ok(SearchOutcome::Aborted);
        }
    }

    log::debug!("astar {start} -> {end}: no path after {} expansions", hook.explored);
    Ok(SearchOutcome::Exhausted)
}
