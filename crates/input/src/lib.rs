//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] edges and
//! provides [`TerminalHost`], the frame clock and input source the engine's
//! host loop runs against on a real terminal.

pub mod host;
pub mod map;

pub use tui_flappy_engine as engine;
pub use tui_flappy_types as types;

pub use host::{TerminalHost, DEFAULT_FRAME_MS};
pub use map::{actions_for_key, should_quit};
