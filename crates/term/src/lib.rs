//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and instead renders into a simple framebuffer that
//! is diffed and flushed to a terminal backend.
//!
//! - [`GameView`] is the engine's presentation port: pure world-to-cell
//!   mapping with half-block pixels, no I/O.
//! - [`TerminalRenderer`] encodes framebuffers as crossterm commands.
//! - [`TerminalPresenter`] ties the two together for the real terminal.

pub mod assets;
pub mod fb;
pub mod game_view;
pub mod presenter;
pub mod renderer;

pub use tui_flappy_core as core;
pub use tui_flappy_engine as engine;
pub use tui_flappy_types as types;

pub use assets::{Banner, TermAssets};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, HALF_BLOCK};
pub use game_view::{GameView, Medal, Viewport};
pub use presenter::TerminalPresenter;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
