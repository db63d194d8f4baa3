//! RNG module - pluggable random-range capability
//!
//! Spawn and recycle only ever need "an integer in `[low, high)`", so that is
//! the whole seam. Production code uses a seeded PCG32; tests can replay a
//! fixed script with [`ScriptedRange`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::IntRange;

/// Source of uniformly distributed integers.
pub trait RangeSource {
    /// Draw from the half-open interval `[low, high)`.
    ///
    /// Callers guarantee `low < high`.
    fn range(&mut self, low: i32, high: i32) -> i32;

    fn sample(&mut self, range: IntRange) -> i32 {
        self.range(range.low, range.high)
    }
}

impl RangeSource for Pcg32 {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        self.random_range(low..high)
    }
}

impl<T: RangeSource + ?Sized> RangeSource for &mut T {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        (**self).range(low, high)
    }
}

/// Create a seeded PCG32 generator
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed script of values, cycling when exhausted.
///
/// Each value is clamped into the requested range, so a script written for
/// one layout never produces out-of-contract positions under another.
#[derive(Debug, Clone)]
pub struct ScriptedRange {
    script: Vec<i32>,
    cursor: usize,
}

impl ScriptedRange {
    pub fn new(script: impl Into<Vec<i32>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RangeSource for ScriptedRange {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if self.script.is_empty() {
            return low;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value.clamp(low, high - 1)
    }
}
