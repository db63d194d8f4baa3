//! Core types module - shared enums and default constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no external dependencies, making them usable
//! in any context (simulation, terminal rendering, input mapping).
//!
//! # Field Dimensions
//!
//! The world is measured in abstract units, one unit per sprite pixel:
//!
//! - **Width**: 144 units
//! - **Height**: 312 units
//! - **Floor line**: y = 256 (the player dies at or below it)
//!
//! # Physics Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY` | 10.0 | Downward acceleration before scaling |
//! | `JUMP_IMPULSE` | -5.0 | Upward velocity set by a jump before scaling |
//! | `SCROLL_SPEED` | 5.0 | Leftward obstacle speed before scaling |
//! | `SPEED_MULTIPLIER` | 10.0 | Global scale applied to all of the above |
//!
//! Net effect: gravity 100 units/s², jump velocity -50 units/s, obstacles
//! scroll left at 50 units/s.
//!
//! # Examples
//!
//! ```
//! use tui_flappy_types::{GameAction, Phase, FIELD_WIDTH, FLOOR_Y};
//!
//! assert_eq!(Phase::Title.next(), Phase::Playing);
//! assert_eq!(GameAction::ALL.len(), 4);
//! assert_eq!(FIELD_WIDTH, 144);
//! assert_eq!(FLOOR_Y, 256.0);
//! ```

/// Field width in world units
pub const FIELD_WIDTH: u16 = 144;

/// Field height in world units
pub const FIELD_HEIGHT: u16 = 312;

/// Floor line; reaching it ends the run
pub const FLOOR_Y: f32 = 256.0;

/// Downward acceleration (scaled by `SPEED_MULTIPLIER`)
pub const GRAVITY: f32 = 10.0;

/// Velocity applied by a jump, negative is up (scaled by `SPEED_MULTIPLIER`)
pub const JUMP_IMPULSE: f32 = -5.0;

/// Leftward obstacle speed (scaled by `SPEED_MULTIPLIER`)
pub const SCROLL_SPEED: f32 = 5.0;

/// Global speed multiplier applied to gravity, jump and scroll speed
pub const SPEED_MULTIPLIER: f32 = 10.0;

/// Player bounding box width
pub const PLAYER_WIDTH: u16 = 17;

/// Player bounding box height
pub const PLAYER_HEIGHT: u16 = 12;

/// Obstacle bounding box width
pub const OBSTACLE_WIDTH: u16 = 26;

/// Obstacle bounding box height
pub const OBSTACLE_HEIGHT: u16 = 160;

/// Number of upper/lower pairs in the obstacle pool
pub const OBSTACLE_PAIRS: usize = 5;

/// Hard capacity of the obstacle pool, in pairs
pub const MAX_OBSTACLE_PAIRS: usize = 16;

/// Lower obstacle y range, half-open `[low, high)`
pub const LOWER_Y_RANGE: (i32, i32) = (180, 201);

/// Upper obstacle y range, half-open `[low, high)`
pub const UPPER_Y_RANGE: (i32, i32) = (-100, 1);

/// Obstacles left of this x are recycled (`x < -OBSTACLE_WIDTH`)
pub const RECYCLE_BELOW: f32 = -(OBSTACLE_WIDTH as f32);

/// Seconds the player must stay inside obstacles before a point is awarded
pub const SCORE_DEBOUNCE_SECS: f32 = 0.75;

/// Score at or above which the game-over screen shows a gold medal
pub const GOLD_MEDAL_SCORE: u32 = 100;


/// Top-level game mode
///
/// The cycle is `Title -> Playing -> GameOver -> Title`; no other
/// transitions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Title,
    Playing,
    GameOver,
}

impl Phase {
    /// The phase this one transitions into
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_flappy_types::Phase;
    ///
    /// assert_eq!(Phase::Title.next(), Phase::Playing);
    /// assert_eq!(Phase::Playing.next(), Phase::GameOver);
    /// assert_eq!(Phase::GameOver.next(), Phase::Title);
    /// ```
    pub fn next(&self) -> Self {
        match self {
            Phase::Title => Phase::Playing,
            Phase::Playing => Phase::GameOver,
            Phase::GameOver => Phase::Title,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Title => "title",
            Phase::Playing => "playing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Presentational state of the player, derived from its velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Velocity is exactly zero
    #[default]
    Idle,
    /// Set by a jump, held until gravity turns velocity positive
    Flying,
    /// Velocity points down
    Falling,
}

/// Which half of a gap pair an obstacle is
///
/// - **Upper**: hangs from above, y in `UPPER_Y_RANGE`
/// - **Lower**: stands below the gap, y in `LOWER_Y_RANGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Upper,
    Lower,
}

/// Edge-triggered inputs the simulation understands
///
/// Several actions may be bound to one physical key (Space drives jump,
/// start and restart at once); the phase decides which one is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Propel the player upward (Playing)
    Jump,
    /// Leave the title screen (Title)
    Start,
    /// Return to the title screen (GameOver)
    Restart,
    /// Flip the bounding-box overlay (any phase)
    ToggleDebug,
}

impl GameAction {
    /// All actions, in polling order
    pub const ALL: [GameAction; 4] = [
        GameAction::Jump,
        GameAction::Start,
        GameAction::Restart,
        GameAction::ToggleDebug,
    ];
}
