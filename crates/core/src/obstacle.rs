//! A single scrolling obstacle (one half of a gap pair)

use glam::Vec2;

use crate::collision::Rect;
use crate::config::Physics;
use crate::types::{ObstacleKind, OBSTACLE_HEIGHT, OBSTACLE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    position: Vec2,
    kind: ObstacleKind,
    size: Vec2,
}

impl Obstacle {
    /// Create an obstacle with the default 26x160 box
    pub fn new(position: Vec2, kind: ObstacleKind) -> Self {
        Self {
            position,
            kind,
            size: Vec2::new(OBSTACLE_WIDTH as f32, OBSTACLE_HEIGHT as f32),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Scroll left; y never changes here.
    pub fn integrate(&mut self, dt: f32, physics: &Physics) {
        self.position.x -= physics.scroll_speed * dt * physics.multiplier;
    }

    /// Move to a fresh spot, keeping kind and size (pool recycling).
    pub(crate) fn reposition(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }
}
