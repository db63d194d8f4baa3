//! Collision detection - axis-aligned bounding boxes

use crate::obstacle::Obstacle;

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap; boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// `x1 < x2 + w2 && x1 + w1 > x2 && y1 < y2 + h2 && y1 + h1 > y2`
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Index of the first obstacle overlapping `player`, in pool order
pub fn first_collision<'a>(
    player: &Rect,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> Option<usize> {
    obstacles
        .into_iter()
        .position(|obstacle| aabb_overlap(player, &obstacle.bounds()))
}
