//! Terminal path-finding visualizer.
//!
//! Run: cargo run --bin pathviz -- --maze --algorithm bfs

use std::io;
use std::ops::ControlFlow;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use mazepath_core::Pos;
use mazepath_demos::{Args, DemoConfig, Painted, Renderer, Session};
use mazepath_maze::generate_maze;
use mazepath_paths::{SearchOutcome, SearchPhase, Step, no_step, step_limit};

/// Corners for a plain grid, entrance and exit for a maze.
fn default_endpoints(cfg: &DemoConfig) -> Result<(Pos, Pos)> {
    let n = cfg.size;
    match cfg.maze_seed {
        Some(seed) => {
            let maze = generate_maze(n, n, seed).context("generating maze")?;
            let entrance = maze.entrance().context("maze has no entrance")?;
            let exit = maze.exit().context("maze has no exit")?;
            Ok((entrance, exit))
        }
        None => Ok((Pos::new(0, 0), Pos::new(n - 1, n - 1))),
    }
}

fn build_session(cfg: &DemoConfig) -> Result<Session> {
    let mut session = match cfg.maze_seed {
        Some(seed) => Session::with_maze(cfg.size, seed)
            .with_context(|| format!("creating {n}x{n} maze (seed {seed})", n = cfg.size))?,
        None => Session::new(cfg.size)
            .with_context(|| format!("creating {n}x{n} grid", n = cfg.size))?,
    };

    let (start, end) = default_endpoints(cfg)?;
    let start = cfg.start.unwrap_or(start);
    let end = cfg.end.unwrap_or(end);
    session
        .paint(start)
        .with_context(|| format!("placing start at {start}"))?;
    session
        .paint(end)
        .with_context(|| format!("placing end at {end}"))?;

    for &p in &cfg.barriers {
        match session
            .paint(p)
            .with_context(|| format!("placing barrier at {p}"))?
        {
            Painted::Barrier => {}
            _ => warn!("ignoring barrier on endpoint {p}"),
        }
    }
    Ok(session)
}

fn status_line(cfg: &DemoConfig, outcome: Option<&SearchOutcome>) -> String {
    match outcome {
        Some(outcome) => format!("{}: {outcome}", cfg.algorithm),
        None => format!("{}: searching...", cfg.algorithm),
    }
}

fn run_animated(cfg: &DemoConfig, session: &mut Session) -> Result<SearchOutcome> {
    let mut renderer = Renderer::stdout().context("initializing terminal")?;
    let mut limit = cfg.max_steps.map(step_limit);
    let status = status_line(cfg, None);
    let mut draw_err: Option<io::Error> = None;

    let outcome = session.run(cfg.algorithm, |step: Step<'_>| {
        if let Err(e) = renderer.draw(step.grid, &status) {
            draw_err = Some(e);
            return ControlFlow::Break(());
        }
        if step.phase == SearchPhase::Explore {
            thread::sleep(cfg.frame_delay);
        }
        match limit.as_mut() {
            Some(limit) => limit(step),
            None => ControlFlow::Continue(()),
        }
    });
    if let Some(e) = draw_err {
        return Err(e).context("drawing frame");
    }
    let outcome = outcome.context("running search")?;

    renderer
        .finish(session.grid(), &status_line(cfg, Some(&outcome)))
        .context("drawing final frame")?;
    Ok(outcome)
}

fn run_plain(cfg: &DemoConfig, session: &mut Session) -> Result<SearchOutcome> {
    let outcome = match cfg.max_steps {
        Some(max) => session.run(cfg.algorithm, step_limit(max)),
        None => session.run(cfg.algorithm, no_step),
    }
    .context("running search")?;

    Renderer::plain(io::stdout().lock())
        .draw(session.grid(), &status_line(cfg, Some(&outcome)))
        .context("printing grid")?;
    Ok(outcome)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cfg = DemoConfig::from(Args::parse());
    let mut session = build_session(&cfg)?;

    let outcome = if cfg.animate {
        run_animated(&cfg, &mut session)?
    } else {
        run_plain(&cfg, &mut session)?
    };
    if let Some(path) = outcome.path() {
        info!("route of {} cells", path.len());
    }
    Ok(())
}
