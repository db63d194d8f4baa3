//! Scoring module - time-debounced points while inside a gap
//!
//! Scoring rules:
//! - An obstacle "straddles" the player when the player's left edge lies
//!   strictly inside the obstacle's horizontal extent.
//! - Every straddling obstacle feeds `dt` into one shared timer. Both halves of
//!   a pair straddle together, so the timer fills twice as fast inside a gap.
//! - Once the timer exceeds the debounce, one point is awarded and the timer
//!   restarts from zero.
//!
//! The shared timer keeps running across back-to-back gaps; that is accepted
//! behaviour, not something to correct here.

use crate::obstacle::Obstacle;

/// Shared debounce timer for awarding points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreTimer {
    elapsed: f32,
    debounce: f32,
}

impl ScoreTimer {
    pub fn new(debounce: f32) -> Self {
        Self {
            elapsed: 0.0,
            debounce,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn debounce(&self) -> f32 {
        self.debounce
    }

    /// Feed `dt`; returns true (and restarts) once the debounce is exceeded.
    pub fn accumulate(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.debounce {
            self.elapsed = 0.0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Whether `player_x` lies strictly inside the obstacle's x extent
pub fn straddles(player_x: f32, obstacle: &Obstacle) -> bool {
    let bounds = obstacle.bounds();
    player_x > bounds.x && player_x < bounds.right()
}

/// Run one frame of scoring and return the points earned.
pub fn score_frame(timer: &mut ScoreTimer, player_x: f32, obstacles: &[Obstacle], dt: f32) -> u32 {
    obstacles
        .iter()
        .filter(|obstacle| straddles(player_x, obstacle))
        .map(|_| u32::from(timer.accumulate(dt)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObstacleKind;
    use glam::Vec2;

    fn pair_at(x: f32) -> [Obstacle; 2] {
        [
            Obstacle::new(Vec2::new(x, -50.0), ObstacleKind::Upper),
            Obstacle::new(Vec2::new(x, 190.0), ObstacleKind::Lower),
        ]
    }

    #[test]
    fn test_two_sub_debounce_steps_score_once() {
        let mut timer = ScoreTimer::new(0.75);
        assert!(!timer.accumulate(0.4));
        assert_eq!(timer.elapsed(), 0.4);
        assert!(timer.accumulate(0.4));
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn test_reaching_debounce_exactly_does_not_score() {
        let mut timer = ScoreTimer::new(0.5);
        assert!(!timer.accumulate(0.25));
        assert!(!timer.accumulate(0.25));
        assert!(timer.accumulate(0.25));
    }

    #[test]
    fn test_straddle_is_strict_on_both_edges() {
        let [upper, _] = pair_at(50.0);
        assert!(!straddles(50.0, &upper));
        assert!(straddles(50.5, &upper));
        assert!(straddles(75.9, &upper));
        assert!(!straddles(76.0, &upper));
    }

    #[test]
    fn test_single_obstacle_scores_after_two_frames() {
        let [upper, _] = pair_at(60.0);
        let mut timer = ScoreTimer::new(0.75);
        assert_eq!(score_frame(&mut timer, 64.0, &[upper], 0.4), 0);
        assert_eq!(score_frame(&mut timer, 64.0, &[upper], 0.4), 1);
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn test_pair_feeds_timer_twice_per_frame() {
        let pair = pair_at(60.0);
        let mut timer = ScoreTimer::new(0.75);
        assert_eq!(score_frame(&mut timer, 64.0, &pair, 0.4), 1);
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn test_outside_gap_leaves_timer_alone() {
        let pair = pair_at(200.0);
        let mut timer = ScoreTimer::new(0.75);
        assert_eq!(score_frame(&mut timer, 64.0, &pair, 0.4), 0);
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn test_reset_clears_elapsed() {
        let mut timer = ScoreTimer::new(0.75);
        timer.accumulate(0.5);
        timer.reset();
        assert_eq!(timer.elapsed(), 0.0);
        assert_eq!(timer.debounce(), 0.75);
    }
}
