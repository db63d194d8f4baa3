//! Obstacle field - a fixed pool of gap pairs that scrolls forever
//!
//! The pool is filled once per run ([`ObstacleField::spawn`]) and afterwards
//! only repositioned in place ([`ObstacleField::recycle`]): pairs that leave
//! the field on the left are moved to the right of the rightmost obstacle with
//! fresh random heights. The obstacle count is constant during play.
//!
//! Pool layout: pair `i` occupies slots `2i` (upper) and `2i + 1` (lower), and
//! both members of a pair always share one x.

use arrayvec::ArrayVec;
use glam::Vec2;
use log::{debug, info};

use crate::config::{GameConfig, ObstacleConfig, Physics, Spacing};
use crate::obstacle::Obstacle;
use crate::rng::RangeSource;
use crate::types::{ObstacleKind, MAX_OBSTACLE_PAIRS};

/// Hard capacity of the obstacle pool
pub const MAX_OBSTACLES: usize = MAX_OBSTACLE_PAIRS * 2;

#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: ArrayVec<Obstacle, MAX_OBSTACLES>,
    layout: ObstacleConfig,
    field_width: f32,
}

impl ObstacleField {
    /// Create an empty field; call [`spawn`](Self::spawn) to fill it.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            obstacles: ArrayVec::new(),
            layout: config.obstacles,
            field_width: config.field.width,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    /// Rightmost obstacle x, if any
    pub fn max_x(&self) -> Option<f32> {
        self.obstacles.iter().map(Obstacle::x).reduce(f32::max)
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Replace the pool with `pair_count` fresh pairs right of the field.
    pub fn spawn<R: RangeSource + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles.clear();

        let pairs = self.layout.pair_count.min(MAX_OBSTACLE_PAIRS);
        let base = self.field_width;
        let mut cursor = base;
        for step in 0..pairs {
            let x = next_x(self.layout.spacing, base, step, &mut cursor, rng);
            let (upper_y, lower_y) = self.roll_heights(rng);
            let upper = self.make(Vec2::new(x, upper_y), ObstacleKind::Upper);
            let lower = self.make(Vec2::new(x, lower_y), ObstacleKind::Lower);
            self.obstacles.push(upper);
            self.obstacles.push(lower);
        }

        info!(
            "spawned {} obstacle pairs, x {:.0}..={:.0}",
            pairs,
            self.obstacles.first().map_or(0.0, Obstacle::x),
            self.max_x().unwrap_or(0.0)
        );
    }

    /// Scroll every obstacle left by one frame.
    pub fn integrate(&mut self, dt: f32, physics: &Physics) {
        for obstacle in &mut self.obstacles {
            obstacle.integrate(dt, physics);
        }
    }

    /// Reposition every obstacle left of the recycle threshold.
    ///
    /// Gone obstacles are handled two at a time (a pair shares its x, so they
    /// leave together), each step placed further right than the last and
    /// beyond the current rightmost obstacle. Returns how many moved.
    pub fn recycle<R: RangeSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        let threshold = self.layout.recycle_below;
        let gone: ArrayVec<usize, MAX_OBSTACLES> = self
            .obstacles
            .iter()
            .enumerate()
            .filter(|(_, obstacle)| obstacle.x() < threshold)
            .map(|(idx, _)| idx)
            .collect();

        if gone.is_empty() {
            return 0;
        }

        let Some(base) = self.max_x() else {
            return 0;
        };
        let mut cursor = base;
        for (step, slots) in gone.chunks(2).enumerate() {
            let x = next_x(self.layout.spacing, base, step, &mut cursor, rng);
            let (upper_y, lower_y) = self.roll_heights(rng);
            for &idx in slots {
                let obstacle = &mut self.obstacles[idx];
                let y = match obstacle.kind() {
                    ObstacleKind::Upper => upper_y,
                    ObstacleKind::Lower => lower_y,
                };
                obstacle.reposition(x, y);
            }
        }

        debug!("recycled {} obstacles past x={:.1}", gone.len(), base);
        gone.len()
    }

    fn make(&self, position: Vec2, kind: ObstacleKind) -> Obstacle {
        Obstacle::new(position, kind).with_size(self.layout.width, self.layout.height)
    }

    /// Draw `(upper_y, lower_y)` for one pair (lower first).
    fn roll_heights<R: RangeSource + ?Sized>(&self, rng: &mut R) -> (f32, f32) {
        let lower_y = rng.sample(self.layout.lower_y) as f32;
        let upper_y = rng.sample(self.layout.upper_y) as f32;
        (upper_y, lower_y)
    }
}

/// X for the `step`-th pair placed relative to `base`.
///
/// `cursor` carries the running position for the accumulating layout and
/// must start at `base`.
fn next_x<R: RangeSource + ?Sized>(
    spacing: Spacing,
    base: f32,
    step: usize,
    cursor: &mut f32,
    rng: &mut R,
) -> f32 {
    match spacing {
        Spacing::Accumulating { base_gap, jitter } => {
            *cursor += base_gap as f32 + rng.sample(jitter) as f32;
            *cursor
        }
        Spacing::Strided { stride, offset } => {
            base + step as f32 * stride as f32 + rng.sample(offset) as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntRange;
    use crate::rng::{seeded, ScriptedRange};
    use proptest::prelude::*;

    fn field_with(spacing: Spacing) -> ObstacleField {
        let mut config = GameConfig::default();
        config.obstacles.spacing = spacing;
        ObstacleField::new(&config)
    }

    fn assert_pairs_well_formed(field: &ObstacleField) {
        assert_eq!(field.len() % 2, 0);
        for pair in field.as_slice().chunks(2) {
            assert_eq!(pair[0].kind(), ObstacleKind::Upper);
            assert_eq!(pair[1].kind(), ObstacleKind::Lower);
            assert_eq!(pair[0].x(), pair[1].x());

            let upper_y = pair[0].position().y;
            let lower_y = pair[1].position().y;
            assert!((-100.0..1.0).contains(&upper_y), "upper y {upper_y}");
            assert!((180.0..201.0).contains(&lower_y), "lower y {lower_y}");
        }
    }

    fn scroll_until_first_pair_gone(field: &mut ObstacleField) {
        let physics = Physics::default();
        while field.as_slice()[0].x() >= -26.0 {
            field.integrate(0.05, &physics);
        }
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = ObstacleField::new(&GameConfig::default());
        assert!(field.is_empty());
        assert_eq!(field.max_x(), None);
    }

    #[test]
    fn test_spawn_creates_five_pairs_in_range() {
        let mut field = ObstacleField::new(&GameConfig::default());
        field.spawn(&mut seeded(1));
        assert_eq!(field.len(), 10);
        assert_pairs_well_formed(&field);
    }

    #[test]
    fn test_spawn_places_pairs_rightward_with_random_gaps() {
        let mut field = ObstacleField::new(&GameConfig::default());
        field.spawn(&mut seeded(2));

        let xs: Vec<f32> = field.iter().step_by(2).map(Obstacle::x).collect();
        let mut prev = 144.0;
        for x in xs {
            let gap = x - prev;
            assert!((150.0..250.0).contains(&gap), "gap {gap}");
            prev = x;
        }
    }

    #[test]
    fn test_spawn_consumes_spacing_then_lower_then_upper() {
        // jitter 50 -> gap 150; lower 190; upper -40
        let mut rng = ScriptedRange::new(vec![50, 190, -40]);
        let mut field = ObstacleField::new(&GameConfig::default());
        field.spawn(&mut rng);

        assert_eq!(field.as_slice()[0].position(), Vec2::new(294.0, -40.0));
        assert_eq!(field.as_slice()[1].position(), Vec2::new(294.0, 190.0));
        assert_eq!(field.as_slice()[2].x(), 444.0);
        assert_eq!(rng.draws(), 15);
    }

    #[test]
    fn test_spawn_replaces_previous_pool() {
        let mut field = ObstacleField::new(&GameConfig::default());
        let mut rng = seeded(3);
        field.spawn(&mut rng);
        field.spawn(&mut rng);
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn test_strided_spawn_is_strictly_increasing() {
        let mut field = field_with(Spacing::strided());
        for seed in 0..50 {
            field.spawn(&mut seeded(seed));
            assert_pairs_well_formed(&field);
            let xs: Vec<f32> = field.iter().step_by(2).map(Obstacle::x).collect();
            assert!(xs.windows(2).all(|w| w[1] > w[0]), "{xs:?}");
            assert!(xs[0] >= 144.0 + 150.0);
        }
    }

    #[test]
    fn test_strided_spawn_uses_index_offsets() {
        let mut rng = ScriptedRange::new(vec![150, 190, -40]);
        let mut field = field_with(Spacing::strided());
        field.spawn(&mut rng);
        let xs: Vec<f32> = field.iter().step_by(2).map(Obstacle::x).collect();
        assert_eq!(xs, vec![294.0, 461.0, 628.0, 795.0, 962.0]);
    }

    #[test]
    fn test_widest_valid_strided_layout_stays_ordered() {
        let mut config = GameConfig::default();
        config.obstacles.pair_count = MAX_OBSTACLE_PAIRS;
        config.obstacles.spacing = Spacing::Strided {
            stride: 60_000,
            offset: IntRange::new(150, 317),
        };
        assert!(config.validate().is_ok());

        let mut field = ObstacleField::new(&config);
        field.spawn(&mut ScriptedRange::new(vec![316, 190, -40]));
        let xs: Vec<f32> = field.iter().step_by(2).map(Obstacle::x).collect();
        assert_eq!(xs.len(), MAX_OBSTACLE_PAIRS);
        assert_eq!(xs[15], 144.0 + 15.0 * 60_000.0 + 316.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]), "{xs:?}");
    }

    #[test]
    fn test_nothing_recycled_while_on_field() {
        let mut field = ObstacleField::new(&GameConfig::default());
        let mut rng = seeded(4);
        field.spawn(&mut rng);
        let before: Vec<Obstacle> = field.iter().copied().collect();
        assert_eq!(field.recycle(&mut rng), 0);
        assert_eq!(field.as_slice(), before.as_slice());
    }

    #[test]
    fn test_threshold_is_strictly_below_negative_width() {
        let mut field = ObstacleField::new(&GameConfig::default());
        let mut rng = ScriptedRange::new(vec![50, 190, -40]);
        field.spawn(&mut rng);

        // First pair at 294; scroll exactly 320 units -> x = -26.
        field.integrate(6.4, &Physics::default());
        assert_eq!(field.as_slice()[0].x(), -26.0);
        assert_eq!(field.recycle(&mut rng), 0);

        field.integrate(0.01, &Physics::default());
        assert_eq!(field.recycle(&mut rng), 2);
    }

    #[test]
    fn test_recycled_pair_lands_right_of_everything() {
        for spacing in [Spacing::default(), Spacing::strided()] {
            let mut field = field_with(spacing);
            let mut rng = seeded(5);
            field.spawn(&mut rng);
            scroll_until_first_pair_gone(&mut field);

            let on_field_max = field
                .iter()
                .filter(|o| o.x() >= -26.0)
                .map(Obstacle::x)
                .fold(f32::MIN, f32::max);

            assert_eq!(field.recycle(&mut rng), 2);
            assert_eq!(field.len(), 10);
            assert!(field.as_slice()[0].x() > on_field_max);
            assert_eq!(field.max_x(), Some(field.as_slice()[0].x()));
            assert_pairs_well_formed(&field);
        }
    }

    #[test]
    fn test_recycle_keeps_kinds_matched_to_height_ranges() {
        let mut field = ObstacleField::new(&GameConfig::default());
        let mut rng = seeded(6);
        field.spawn(&mut rng);

        let physics = Physics::default();
        for _ in 0..2000 {
            field.integrate(0.05, &physics);
            field.recycle(&mut rng);
            assert_eq!(field.len(), 10);
        }
        assert_pairs_well_formed(&field);
    }

    #[test]
    fn test_multiple_gone_pairs_get_increasing_x() {
        let mut config = GameConfig::default();
        config.obstacles.recycle_below = 10_000.0;
        let mut field = ObstacleField::new(&config);
        let mut rng = seeded(7);
        field.spawn(&mut rng);
        let max_before = field.max_x().unwrap();

        assert_eq!(field.recycle(&mut rng), 10);
        let xs: Vec<f32> = field.iter().step_by(2).map(Obstacle::x).collect();
        assert!(xs[0] > max_before);
        assert!(xs.windows(2).all(|w| w[1] > w[0]), "{xs:?}");
    }

    #[test]
    fn test_clear_empties_pool() {
        let mut field = ObstacleField::new(&GameConfig::default());
        field.spawn(&mut seeded(8));
        field.clear();
        assert!(field.is_empty());
    }

    proptest! {
        #[test]
        fn spawn_ranges_hold_for_any_seed(seed in any::<u64>()) {
            let mut field = ObstacleField::new(&GameConfig::default());
            field.spawn(&mut seeded(seed));
            prop_assert_eq!(field.len(), 10);
            for pair in field.as_slice().chunks(2) {
                prop_assert_eq!(pair[0].x(), pair[1].x());
                prop_assert!((-100.0..1.0).contains(&pair[0].position().y));
                prop_assert!((180.0..201.0).contains(&pair[1].position().y));
            }
        }
    }
}
