//! Command-line configuration for the `pathviz` demo.

use std::time::Duration;

use clap::Parser;
use mazepath_core::Pos;
use mazepath_paths::Algorithm;
use thiserror::Error;

/// Default grid side length.
pub const DEFAULT_SIZE: i32 = 20;

/// Watch A* or breadth-first search explore a grid in the terminal.
#[derive(Parser, Debug)]
#[command(name = "pathviz")]
#[command(about = "Animate shortest-path searches on a square grid")]
pub struct Args {
    /// Grid side length (at least 3)
    #[arg(long, short = 'n', default_value_t = DEFAULT_SIZE)]
    pub size: i32,

    /// Seed the grid with a generated maze
    #[arg(long)]
    pub maze: bool,

    /// Maze seed (implies --maze)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search algorithm: astar or bfs
    #[arg(long, short, default_value = "astar")]
    pub algorithm: Algorithm,

    /// Start cell as ROW,COL (default: top-left, or the maze entrance)
    #[arg(long, value_parser = parse_pos)]
    pub start: Option<Pos>,

    /// End cell as ROW,COL (default: bottom-right, or the maze exit)
    #[arg(long, value_parser = parse_pos)]
    pub end: Option<Pos>,

    /// Barrier cell as ROW,COL; repeat for more
    #[arg(long = "barrier", value_parser = parse_pos)]
    pub barriers: Vec<Pos>,

    /// Delay between animation frames in milliseconds
    #[arg(long, default_value_t = 15)]
    pub delay_ms: u64,

    /// Abort the search after this many exploration steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Only print the final grid
    #[arg(long)]
    pub no_animate: bool,
}

/// Resolved settings the demo runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub size: i32,
    pub maze_seed: Option<u64>,
    pub algorithm: Algorithm,
    pub start: Option<Pos>,
    pub end: Option<Pos>,
    pub barriers: Vec<Pos>,
    pub frame_delay: Duration,
    pub max_steps: Option<usize>,
    pub animate: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            maze_seed: None,
            algorithm: Algorithm::default(),
            start: None,
            end: None,
            barriers: Vec::new(),
            frame_delay: Duration::from_millis(15),
            max_steps: None,
            animate: true,
        }
    }
}

impl From<Args> for DemoConfig {
    fn from(args: Args) -> Self {
        // `--maze` without `--seed` falls back to 42.
        let maze_seed = match (args.maze, args.seed) {
            (_, Some(seed)) => Some(seed),
            (true, None) => Some(42),
            (false, None) => None,
        };
        Self {
            size: args.size,
            maze_seed,
            algorithm: args.algorithm,
            start: args.start,
            end: args.end,
            barriers: args.barriers,
            frame_delay: Duration::from_millis(args.delay_ms),
            max_steps: args.max_steps,
            animate: !args.no_animate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected ROW,COL but got {0:?}")]
pub struct ParsePosError(String);

/// Parse `"ROW,COL"` into a [`Pos`].
pub fn parse_pos(s: &str) -> Result<Pos, ParsePosError> {
    let err = || ParsePosError(s.to_string());
    let (row, col) = s.split_once(',').ok_or_else(err)?;
    let row = row.trim().parse().map_err(|_| err())?;
    let col = col.trim().parse().map_err(|_| err())?;
    Ok(Pos::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positions() {
        assert_eq!(parse_pos("3,4"), Ok(Pos::new(3, 4)));
        assert_eq!(parse_pos(" 0 , 12 "), Ok(Pos::new(0, 12)));
        assert!(parse_pos("3").is_err());
        assert!(parse_pos("a,b").is_err());
    }

    #[test]
    fn defaults() {
        let cfg = DemoConfig::from(Args::parse_from(["pathviz"]));
        assert_eq!(cfg, DemoConfig::default());
    }

    #[test]
    fn full_command_line() {
        let args = Args::parse_from([
            "pathviz",
            "--size",
            "9",
            "--seed",
            "7",
            "-a",
            "bfs",
            "--start",
            "0,1",
            "--end",
            "8,7",
            "--barrier",
            "2,2",
            "--barrier",
            "3,3",
            "--max-steps",
            "50",
            "--no-animate",
        ]);
        let cfg = DemoConfig::from(args);
        assert_eq!(cfg.size, 9);
        assert_eq!(cfg.maze_seed, Some(7));
        assert_eq!(cfg.algorithm, Algorithm::Bfs);
        assert_eq!(cfg.start, Some(Pos::new(0, 1)));
        assert_eq!(cfg.end, Some(Pos::new(8, 7)));
        assert_eq!(cfg.barriers, vec![Pos::new(2, 2), Pos::new(3, 3)]);
        assert_eq!(cfg.max_steps, Some(50));
        assert!(!cfg.animate);
    }

    #[test]
    fn maze_flag_without_seed() {
        let cfg = DemoConfig::from(Args::parse_from(["pathviz", "--maze"]));
        assert_eq!(cfg.maze_seed, Some(42));
    }

    #[test]
    fn rejects_unknown_algorithm() {
        assert!(Args::try_parse_from(["pathviz", "-a", "dfs"]).is_err());
    }
}
