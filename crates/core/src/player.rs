//! Player kinematics
//!
//! The player only moves vertically: gravity accelerates it downward every
//! frame and a jump replaces its velocity with a fixed upward impulse. No
//! clamping happens here; the engine decides what the floor means.

use glam::Vec2;

use crate::collision::Rect;
use crate::config::Physics;
use crate::types::{PlayerState, PLAYER_HEIGHT, PLAYER_WIDTH};

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    position: Vec2,
    velocity: Vec2,
    state: PlayerState,
    size: Vec2,
    physics: Physics,
}

impl Player {
    /// Create a resting player with the default 17x12 box
    pub fn new(position: Vec2, physics: Physics) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            state: PlayerState::Idle,
            size: Vec2::new(PLAYER_WIDTH as f32, PLAYER_HEIGHT as f32),
            physics,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Replace velocity with the scaled jump impulse.
    pub fn jump(&mut self) {
        self.velocity = Vec2::new(0.0, self.physics.jump_impulse * self.physics.multiplier);
        self.state = PlayerState::Flying;
    }

    /// Advance by `dt` seconds.
    ///
    /// State is derived from the velocity *before* gravity is applied, so a
    /// freshly jumped player stays `Flying` until a frame starts with a
    /// downward velocity.
    pub fn integrate(&mut self, dt: f32) {
        if self.velocity.y > 0.0 {
            self.state = PlayerState::Falling;
        }
        if self.velocity == Vec2::ZERO {
            self.state = PlayerState::Idle;
        }

        self.velocity.y += self.physics.gravity * self.physics.multiplier * dt;
        self.position += self.velocity * dt;
    }

    /// Freeze in place (used when the player hits the floor).
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}
