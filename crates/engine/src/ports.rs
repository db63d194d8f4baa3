//! Collaborator ports - the only way the engine talks to the outside world
//!
//! All calls are synchronous and made from the single simulation thread.

use anyhow::Result;

use crate::core::{Obstacle, Player};
use crate::types::GameAction;

/// Four independent edge-triggered buttons.
///
/// Each method returns true at most once per physical press. Implementations
/// track key state; the engine never does.
pub trait InputSource {
    fn jump_pressed(&mut self) -> bool;
    fn start_pressed(&mut self) -> bool;
    fn restart_pressed(&mut self) -> bool;
    fn debug_pressed(&mut self) -> bool;
}

/// Per-frame timing and the close signal, polled at the top of each frame.
pub trait FrameClock {
    fn should_close(&mut self) -> Result<bool>;

    /// Seconds since the previous frame.
    fn delta_time(&mut self) -> f32;
}

/// Draw operations, bracketed by `begin_frame`/`end_frame`.
pub trait PresentationSink {
    fn begin_frame(&mut self) -> Result<()>;
    fn end_frame(&mut self) -> Result<()>;

    fn draw_background(&mut self);
    fn draw_title(&mut self);
    fn draw_obstacle(&mut self, obstacle: &Obstacle);
    fn draw_player(&mut self, player: &Player);
    fn draw_score(&mut self, score: u32);
    fn draw_game_over(&mut self, score: u32);
    /// Bounding boxes for the player and every obstacle.
    fn draw_debug(&mut self, player: &Player, obstacles: &[Obstacle]);
}

/// One-shot asset loading, completed before the first draw call.
pub trait AssetLoader {
    fn load_assets(&mut self) -> Result<()>;
}

/// Pending edges for one frame.
///
/// `press` records an edge, each query consumes it. Hosts call `clear` at the
/// start of every frame so an edge the current phase ignores does not leak
/// into a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub jump: bool,
    pub start: bool,
    pub restart: bool,
    pub debug: bool,
}

impl FrameInput {
    pub fn none() -> Self {
        Self::default()
    }

    /// A frame with a single action pressed
    pub fn pressed(action: GameAction) -> Self {
        let mut input = Self::default();
        input.press(action);
        input
    }

    pub fn press(&mut self, action: GameAction) {
        match action {
            GameAction::Jump => self.jump = true,
            GameAction::Start => self.start = true,
            GameAction::Restart => self.restart = true,
            GameAction::ToggleDebug => self.debug = true,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl InputSource for FrameInput {
    fn jump_pressed(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    fn start_pressed(&mut self) -> bool {
        std::mem::take(&mut self.start)
    }

    fn restart_pressed(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    fn debug_pressed(&mut self) -> bool {
        std::mem::take(&mut self.debug)
    }
}
