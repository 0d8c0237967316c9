//! Crossterm renderer for a [`Grid`].
//!
//! Each cell is drawn as a two-column block coloured by its state, so the
//! board looks square in most terminals.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use mazepath_core::{CellState, Grid};

/// Background colour for each cell state.
pub fn state_color(state: CellState) -> Color {
    match state {
        CellState::Empty => Color::Rgb { r: 255, g: 255, b: 255 },
        CellState::Barrier => Color::Rgb { r: 0, g: 0, b: 0 },
        CellState::Start => Color::Rgb { r: 255, g: 165, b: 0 },
        CellState::End => Color::Rgb { r: 64, g: 224, b: 208 },
        CellState::Open => Color::Rgb { r: 0, g: 255, b: 0 },
        CellState::Closed => Color::Rgb { r: 255, g: 0, b: 0 },
        CellState::Path => Color::Rgb { r: 128, g: 0, b: 128 },
    }
}

/// Draws frames to any writer. Use [`Renderer::stdout`] for the terminal.
pub struct Renderer<W: Write> {
    out: W,
    fullscreen: bool,
}

impl Renderer<io::Stdout> {
    /// A renderer that takes over the terminal's alternate screen until
    /// dropped.
    pub fn stdout() -> io::Result<Self> {
        let mut out = io::stdout();
        queue!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        out.flush()?;
        Ok(Self {
            out,
            fullscreen: true,
        })
    }
}

impl<W: Write> Renderer<W> {
    /// A renderer that appends frames to `out` without cursor movement.
    pub fn plain(out: W) -> Self {
        Self {
            out,
            fullscreen: false,
        }
    }

    /// Redraw the whole grid followed by a status line.
    pub fn draw(&mut self, grid: &Grid, status: &str) -> io::Result<()> {
        if self.fullscreen {
            queue!(self.out, cursor::MoveTo(0, 0))?;
        }
        let mut row = 0;
        for cell in grid.cells() {
            if cell.row() != row {
                queue!(self.out, ResetColor, Print("\r\n"))?;
                row = cell.row();
            }
            let state = cell.state();
            queue!(
                self.out,
                SetBackgroundColor(state_color(state)),
                SetForegroundColor(Color::Black),
                Print(state.symbol()),
                Print(' ')
            )?;
        }
        queue!(self.out, ResetColor, Print("\r\n"))?;
        if self.fullscreen {
            queue!(self.out, terminal::Clear(ClearType::CurrentLine))?;
        }
        queue!(self.out, Print(status), Print("\r\n"))?;
        self.out.flush()
    }

    /// Leave the alternate screen, if entered, and print the final board.
    pub fn finish(mut self, grid: &Grid, status: &str) -> io::Result<()> {
        self.restore()?;
        self.fullscreen = false;
        self.draw(grid, status)
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.fullscreen {
            queue!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
            self.out.flush()?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for Renderer<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazepath_core::Pos;

    #[test]
    fn every_state_has_a_distinct_color() {
        let states = [
            CellState::Empty,
            CellState::Barrier,
            CellState::Start,
            CellState::End,
            CellState::Open,
            CellState::Closed,
            CellState::Path,
        ];
        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1..] {
                assert_ne!(state_color(*a), state_color(*b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn plain_frame_contains_symbols_and_status() {
        let mut g = Grid::new(3).unwrap();
        g.set_state(Pos::new(0, 0), CellState::Start).unwrap();
        g.set_state(Pos::new(2, 2), CellState::End).unwrap();
        g.set_state(Pos::new(1, 1), CellState::Barrier).unwrap();

        let mut buf = Vec::new();
        Renderer::plain(&mut buf).draw(&g, "ready").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("S "));
        assert!(text.contains("# "));
        assert!(text.contains("E "));
        assert!(text.ends_with("ready\r\n"));
        assert_eq!(text.matches("\r\n").count(), 4);
    }
}
