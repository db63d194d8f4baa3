//! Engine module - the phase machine and the ports it drives
//!
//! The engine owns the player, the obstacle pool, the score and the current
//! [`Phase`](types::Phase). Everything outside the simulation (key state,
//! timing, drawing, asset files) sits behind the traits in [`ports`], so the
//! same engine runs in the terminal host and in headless tests.
//!
//! # Example
//!
//! ```
//! use tui_flappy_engine::{Engine, FrameInput};
//! use tui_flappy_engine::core::GameConfig;
//! use tui_flappy_engine::types::{GameAction, Phase};
//!
//! let mut engine = Engine::with_seed(GameConfig::default(), 42);
//! engine.advance(0.016, &mut FrameInput::pressed(GameAction::Start));
//! assert_eq!(engine.phase(), Phase::Playing);
//! assert_eq!(engine.obstacles().len(), 10);
//! ```

pub mod engine;
pub mod ports;

pub use tui_flappy_core as core;
pub use tui_flappy_types as types;

pub use engine::{Engine, GameOverCause};
pub use ports::{AssetLoader, FrameClock, FrameInput, InputSource, PresentationSink};
