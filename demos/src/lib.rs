//! Terminal front-end for the mazepath crates.
//!
//! [`Session`] holds the editing workflow (paint start, end and barriers,
//! then run a search), [`Renderer`] draws a grid with crossterm and
//! [`config`] turns command-line flags into a [`DemoConfig`].

pub mod config;
pub mod render;
pub mod session;

pub use config::{Args, DEFAULT_SIZE, DemoConfig, ParsePosError, parse_pos};
pub use render::{Renderer, state_color};
pub use session::{Painted, Session, SessionError};
