//! Core simulation module - pure, deterministic (given a seed), and testable
//!
//! This module contains the entities and rules of the game. It has **no
//! dependencies** on terminals, input devices, or clocks, making it:
//!
//! - **Deterministic**: Same seed and same `dt` sequence produce identical runs
//! - **Testable**: Every rule is a small function or method with unit tests
//! - **Allocation-free per frame**: The obstacle pool is a fixed-capacity array
//!
//! # Module Structure
//!
//! - [`config`]: Immutable tuning (`GameConfig`), JSON/env loading and validation
//! - [`player`]: Player kinematics (gravity, jump impulse, presentational state)
//! - [`obstacle`]: A single scrolling obstacle
//! - [`collision`]: Axis-aligned bounding boxes and overlap tests
//! - [`scoring`]: Debounced, time-based scoring while inside a gap
//! - [`field`]: Fixed pool of obstacle pairs with spawn and in-place recycling
//! - [`rng`]: Pluggable random-range capability
//!
//! # Example
//!
//! ```
//! use tui_flappy_core::{rng, GameConfig, ObstacleField, Player};
//!
//! let config = GameConfig::default();
//! let mut rng = rng::seeded(7);
//!
//! let mut field = ObstacleField::new(&config);
//! field.spawn(&mut rng);
//! assert_eq!(field.len(), 10);
//!
//! let mut player = Player::new(config.player.spawn, config.physics);
//! player.jump();
//! player.integrate(0.016);
//! assert!(player.velocity().y < 0.0);
//! ```
//!
//! # Timing
//!
//! Integration uses a variable timestep: callers pass the real frame delta in
//! seconds (`dt >= 0`). Outcomes therefore depend on frame rate; tests inject a
//! fixed `dt` when they need exact trajectories.

pub mod collision;
pub mod config;
pub mod field;
pub mod obstacle;
pub mod player;
pub mod rng;
pub mod scoring;

pub use tui_flappy_types as types;

// Re-export commonly used types for convenience
pub use collision::{aabb_overlap, first_collision, Rect};
pub use config::{
    FieldConfig, GameConfig, IntRange, ObstacleConfig, Physics, PlayerConfig, ScoringConfig,
    Spacing, MAX_LAYOUT_REACH,
};
pub use field::{ObstacleField, MAX_OBSTACLES};
pub use obstacle::Obstacle;
pub use player::Player;
pub use rng::{RangeSource, ScriptedRange};
pub use scoring::{score_frame, straddles, ScoreTimer};
