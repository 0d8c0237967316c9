//! Predecessor bookkeeping and route reconstruction shared by A* and BFS.

use std::ops::ControlFlow;

use mazepath_core::{CellState, Grid, Pos};

use crate::search::{SearchError, Step, StepHook};

/// Per-search `came_from` map, indexed by flat cell index.
///
/// Each cell has at most one predecessor and it is only replaced by a
/// strictly cheaper one, so following links always reaches the start.
pub(crate) struct Trail {
    came_from: Vec<Option<usize>>,
}

impl Trail {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            came_from: vec![None; len],
        }
    }

    #[inline]
    pub(crate) fn link(&mut self, cell: usize, parent: usize) {
        self.came_from[cell] = Some(parent);
    }

    #[inline]
    pub(crate) fn parent(&self, cell: usize) -> Option<usize> {
        self.came_from[cell]
    }
}

/// Mark the route from `start` to `end` and return it, `start` first.
///
/// Every cell strictly between the endpoints becomes `Path`; the endpoints
/// are re-marked `Start` and `End`.
pub(crate) fn reconstruct_path<F>(
    grid: &mut Grid,
    trail: &Trail,
    start: usize,
    end: usize,
    hook: &mut StepHook<F>,
) -> Result<Vec<Pos>, SearchError>
where
    F: FnMut(Step<'_>) -> ControlFlow<()>,
{
    let mut route = vec![grid.pos(end)];
    let mut current = end;
    while let Some(prev) = trail.parent(current) {
        let p = grid.pos(prev);
        route.push(p);
        if prev == start {
            break;
        }
        grid.set_state(p, CellState::Path)?;
        hook.reconstruct(grid, p);
        current = prev;
    }
    grid.set_state(grid.pos(end), CellState::End)?;
    grid.set_state(grid.pos(start), CellState::Start)?;
    route.reverse();
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::no_step;

    #[test]
    fn walks_back_to_start() {
        let mut g = Grid::new(3).unwrap();
        let idx = |r, c| g.index(Pos::new(r, c)).unwrap();
        let (a, b, c, d) = (idx(0, 0), idx(0, 1), idx(1, 1), idx(2, 1));

        let mut trail = Trail::new(g.len());
        trail.link(b, a);
        trail.link(c, b);
        trail.link(d, c);

        let mut hook = StepHook::new(no_step);
        let route = reconstruct_path(&mut g, &trail, a, d, &mut hook).unwrap();
        assert_eq!(
            route,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1), Pos::new(2, 1)]
        );
        assert_eq!(g.state(Pos::new(0, 0)), Ok(CellState::Start));
        assert_eq!(g.state(Pos::new(0, 1)), Ok(CellState::Path));
        assert_eq!(g.state(Pos::new(1, 1)), Ok(CellState::Path));
        assert_eq!(g.state(Pos::new(2, 1)), Ok(CellState::End));
        assert_eq!(g.count(CellState::Path), 2);
    }

    #[test]
    fn adjacent_endpoints_mark_nothing() {
        let mut g = Grid::new(3).unwrap();
        let a = g.index(Pos::new(1, 1)).unwrap();
        let b = g.index(Pos::new(1, 2)).unwrap();
        let mut trail = Trail::new(g.len());
        trail.link(b, a);

        let mut hook = StepHook::new(no_step);
        let route = reconstruct_path(&mut g, &trail, a, b, &mut hook).unwrap();
        assert_eq!(route, vec![Pos::new(1, 1), Pos::new(1, 2)]);
        assert_eq!(g.count(CellState::Path), 0);
    }
}
