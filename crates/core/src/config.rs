//! Game configuration
//!
//! Every tunable the simulation reads lives in [`GameConfig`], which is built
//! once and handed to the engine. Defaults reproduce the constants in
//! `tui_flappy_types`.
//!
//! # Environment Variables
//!
//! - `FLAPPY_CONFIG`: Path to a JSON document; missing fields keep defaults
//! - `FLAPPY_SEED`: RNG seed (u64) for reproducible obstacle layouts
//! - `FLAPPY_RECYCLE_BELOW`: Override the off-field recycle threshold
//!
//! ```
//! use tui_flappy_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "seed": 42, "obstacles": { "pair_count": 3 } }"#).unwrap();
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(config.obstacles.pair_count, 3);
//! assert_eq!(config.obstacles.width, 26.0);
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Furthest a single spawn may place a pair beyond its base x.
///
/// Keeps every computed x well inside the range where `f32` holds whole
/// units exactly, so pairs stay strictly ordered.
pub const MAX_LAYOUT_REACH: i64 = 1 << 20;

/// Half-open integer range `[low, high)` for random draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub low: i32,
    pub high: i32,
}

impl IntRange {
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn is_empty(&self) -> bool {
        self.high <= self.low
    }

    /// Number of distinct values the range can produce
    pub fn span(&self) -> i64 {
        i64::from(self.high) - i64::from(self.low)
    }
}

impl From<(i32, i32)> for IntRange {
    fn from((low, high): (i32, i32)) -> Self {
        Self { low, high }
    }
}

/// Playfield extents in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Reaching this y ends the run
    pub floor_y: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH as f32,
            height: FIELD_HEIGHT as f32,
            floor_y: FLOOR_Y,
        }
    }
}

/// Kinematic constants, all scaled by `multiplier` at the point of use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub scroll_speed: f32,
    pub multiplier: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            scroll_speed: SCROLL_SPEED,
            multiplier: SPEED_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top-left of the bounding box when a session starts
    pub spawn: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        // Integer halves, so the default spawn lands on whole units (64, 150).
        let x = FIELD_WIDTH / 2 - PLAYER_WIDTH / 2;
        let y = FIELD_HEIGHT / 2 - PLAYER_HEIGHT / 2;
        Self {
            spawn: Vec2::new(x as f32, y as f32),
            width: PLAYER_WIDTH as f32,
            height: PLAYER_HEIGHT as f32,
        }
    }
}

/// How pair x positions are chosen on spawn and recycle
///
/// Both strategies produce strictly increasing x within one spawn or one
/// recycle pass (given a config that passes [`GameConfig::validate`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Spacing {
    /// `x = previous + base_gap + jitter`, starting from the base position
    Accumulating { base_gap: i32, jitter: IntRange },
    /// `x = base + step * stride + offset`
    Strided { stride: i32, offset: IntRange },
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Accumulating {
            base_gap: 100,
            jitter: IntRange::new(50, 150),
        }
    }
}

impl Spacing {
    /// The per-pair randomized offset used by the strided layout
    pub fn strided() -> Self {
        Spacing::Strided {
            stride: 167,
            offset: IntRange::new(150, 317),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f32,
    pub height: f32,
    /// Number of upper/lower pairs in the pool
    pub pair_count: usize,
    pub lower_y: IntRange,
    pub upper_y: IntRange,
    pub spacing: Spacing,
    /// Obstacles with `x < recycle_below` are repositioned
    pub recycle_below: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: OBSTACLE_WIDTH as f32,
            height: OBSTACLE_HEIGHT as f32,
            pair_count: OBSTACLE_PAIRS,
            lower_y: LOWER_Y_RANGE.into(),
            upper_y: UPPER_Y_RANGE.into(),
            spacing: Spacing::default(),
            recycle_below: RECYCLE_BELOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub debounce_secs: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            debounce_secs: SCORE_DEBOUNCE_SECS,
        }
    }
}

/// Complete, immutable game tuning
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub physics: Physics,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    pub scoring: ScoringConfig,
    /// Fixed RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Build from the process environment (see module docs).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = match var("FLAPPY_CONFIG") {
            Some(path) => Self::from_json_file(&path)?,
            None => Self::default(),
        };

        if let Some(seed) = var("FLAPPY_SEED") {
            let seed = seed
                .parse()
                .with_context(|| format!("FLAPPY_SEED must be an unsigned integer, got {seed:?}"))?;
            config.seed = Some(seed);
        }

        if let Some(below) = var("FLAPPY_RECYCLE_BELOW") {
            config.obstacles.recycle_below = below
                .parse()
                .with_context(|| format!("FLAPPY_RECYCLE_BELOW must be a number, got {below:?}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading game config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("loading game config {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing game config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot honour.
    pub fn validate(&self) -> Result<()> {
        let obstacles = &self.obstacles;

        if obstacles.pair_count == 0 || obstacles.pair_count > MAX_OBSTACLE_PAIRS {
            bail!(
                "obstacles.pair_count must be in 1..={MAX_OBSTACLE_PAIRS}, got {}",
                obstacles.pair_count
            );
        }
        if obstacles.lower_y.is_empty() {
            bail!("obstacles.lower_y is an empty range: {:?}", obstacles.lower_y);
        }
        if obstacles.upper_y.is_empty() {
            bail!("obstacles.upper_y is an empty range: {:?}", obstacles.upper_y);
        }

        let pairs = obstacles.pair_count as i64;
        let reach = match obstacles.spacing {
            Spacing::Accumulating { base_gap, jitter } => {
                if jitter.is_empty() {
                    bail!("spacing jitter is an empty range: {jitter:?}");
                }
                if i64::from(base_gap) + i64::from(jitter.low) <= 0 {
                    bail!("accumulating spacing must always advance (base_gap + jitter.low > 0)");
                }
                pairs * (i64::from(base_gap) + i64::from(jitter.high) - 1)
            }
            Spacing::Strided { stride, offset } => {
                if offset.is_empty() {
                    bail!("spacing offset is an empty range: {offset:?}");
                }
                if offset.low <= 0 {
                    bail!("strided spacing offset must start above zero, got {}", offset.low);
                }
                if i64::from(stride) < offset.span() {
                    bail!(
                        "strided spacing stride {stride} is smaller than its offset span {}",
                        offset.span()
                    );
                }
                (pairs - 1) * i64::from(stride) + i64::from(offset.high) - 1
            }
        };
        if reach > MAX_LAYOUT_REACH {
            bail!(
                "obstacle spacing places pairs up to {reach} units out, limit is {MAX_LAYOUT_REACH}"
            );
        }

        let sizes = [
            ("field.width", self.field.width),
            ("field.height", self.field.height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("obstacles.width", obstacles.width),
            ("obstacles.height", obstacles.height),
        ];
        for (name, value) in sizes {
            if !(value > 0.0) {
                bail!("{name} must be positive, got {value}");
            }
        }

        if self.scoring.debounce_secs < 0.0 {
            bail!("scoring.debounce_secs must not be negative");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_shared_constants() {
        let config = GameConfig::default();
        assert_eq!(config.field.width, 144.0);
        assert_eq!(config.field.floor_y, 256.0);
        assert_eq!(config.player.spawn, Vec2::new(64.0, 150.0));
        assert_eq!(config.obstacles.pair_count, 5);
        assert_eq!(config.obstacles.recycle_below, -26.0);
        assert_eq!(config.scoring.debounce_secs, 0.75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "physics": { "gravity": 12.5 } }"#).unwrap();
        assert_eq!(config.physics.gravity, 12.5);
        assert_eq!(config.physics.multiplier, 10.0);
        assert_eq!(config.obstacles, ObstacleConfig::default());
    }

    #[test]
    fn json_selects_strided_spacing() {
        let config = GameConfig::from_json_str(
            r#"{ "obstacles": { "spacing": { "mode": "strided", "stride": 200, "offset": { "low": 150, "high": 317 } } } }"#,
        )
        .unwrap();
        assert_eq!(
            config.obstacles.spacing,
            Spacing::Strided {
                stride: 200,
                offset: IntRange::new(150, 317)
            }
        );
    }

    #[test]
    fn rejects_pool_overflow() {
        let mut config = GameConfig::default();
        config.obstacles.pair_count = MAX_OBSTACLE_PAIRS + 1;
        assert!(config.validate().is_err());

        config.obstacles.pair_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_stride_narrower_than_offset_span() {
        let mut config = GameConfig::default();
        config.obstacles.spacing = Spacing::Strided {
            stride: 100,
            offset: IntRange::new(150, 317),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stride"));

        config.obstacles.spacing = Spacing::strided();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_spacing_that_reaches_too_far() {
        let config = GameConfig::from_json_str(
            r#"{ "obstacles": { "spacing": { "mode": "strided", "stride": 1000000000, "offset": { "low": 150, "high": 317 } } } }"#,
        );
        let err = config.unwrap_err();
        assert!(format!("{err:#}").contains("limit"), "{err:#}");

        let mut config = GameConfig::default();
        config.obstacles.spacing = Spacing::Accumulating {
            base_gap: i32::MAX - 8,
            jitter: IntRange::new(50, 150),
        };
        assert!(config.validate().is_err());

        config.obstacles.spacing = Spacing::Accumulating {
            base_gap: i32::MIN,
            jitter: IntRange::new(i32::MIN, i32::MAX),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_widest_layout_within_limit() {
        let mut config = GameConfig::default();
        config.obstacles.pair_count = MAX_OBSTACLE_PAIRS;
        config.obstacles.spacing = Spacing::Strided {
            stride: 60_000,
            offset: IntRange::new(150, 317),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_height_range() {
        let mut config = GameConfig::default();
        config.obstacles.lower_y = IntRange::new(200, 200);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(GameConfig::from_json_str("{ seed: }").is_err());
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let config =
            GameConfig::from_vars(vars(&[("FLAPPY_SEED", " 99 "), ("FLAPPY_RECYCLE_BELOW", "0")]))
                .unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.obstacles.recycle_below, 0.0);
    }

    #[test]
    fn env_rejects_non_numeric_seed() {
        let err = GameConfig::from_vars(vars(&[("FLAPPY_SEED", "abc")])).unwrap_err();
        assert!(err.to_string().contains("FLAPPY_SEED"));
    }

    #[test]
    fn env_reports_missing_config_file() {
        let result = GameConfig::from_vars(vars(&[(
            "FLAPPY_CONFIG",
            "/definitely/not/here/flappy.json",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = GameConfig::from_vars(vars(&[("FLAPPY_SEED", ""), ("FLAPPY_CONFIG", "  ")]))
            .unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
