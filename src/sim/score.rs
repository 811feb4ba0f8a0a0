//! Run scoring
//!
//! Distance, airtime and trick points accumulate into a single score.
//! Once the crash gate is set nothing changes until `reset`.

use serde::{Deserialize, Serialize};

use crate::consts::{DISTANCE_SCALE, SCORE_PER_AIR_SECOND, SCORE_PER_METER};

/// Score accumulators for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSystem {
    /// Distance in "meters" (scaled scroll pixels)
    distance: f32,
    /// Seconds spent off the ground
    airtime: f32,
    trick_points: u32,
    crashed: bool,
}

/// Non-finite and negative deltas count as zero
#[inline]
fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

impl ScoreSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_crashed(&mut self, crashed: bool) {
        self.crashed = crashed;
    }

    pub fn is_crashed(&self) -> bool {
        self.crashed
    }

    /// Add scrolled pixels
    pub fn add_distance(&mut self, px_delta: f32) {
        if self.crashed {
            return;
        }
        self.distance += non_negative(px_delta) * DISTANCE_SCALE;
    }

    pub fn add_airtime(&mut self, dt_seconds: f32) {
        if self.crashed {
            return;
        }
        self.airtime += non_negative(dt_seconds);
    }

    /// Fractional points are floored
    pub fn add_trick_points(&mut self, points: f32) {
        if self.crashed {
            return;
        }
        let whole = non_negative(points).floor();
        self.trick_points = self.trick_points.saturating_add(whole as u32);
    }

    /// Distance dominates, airtime is a moderate bonus, tricks add directly
    pub fn score(&self) -> u64 {
        let total = self.distance * SCORE_PER_METER
            + self.airtime * SCORE_PER_AIR_SECOND
            + self.trick_points as f32;
        total.floor() as u64
    }

    /// Raw (unfloored) distance
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn distance_meters(&self) -> u32 {
        self.distance.floor() as u32
    }

    /// Airtime rounded to one decimal
    pub fn airtime_seconds(&self) -> f32 {
        (self.airtime * 10.0).round() / 10.0
    }

    pub fn trick_points(&self) -> u32 {
        self.trick_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Distance(f32),
        Airtime(f32),
        Tricks(f32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-500.0f32..2000.0).prop_map(Op::Distance),
            (-1.0f32..1.0).prop_map(Op::Airtime),
            (-300.0f32..600.0).prop_map(Op::Tricks),
        ]
    }

    fn apply(score: &mut ScoreSystem, op: &Op) {
        match *op {
            Op::Distance(d) => score.add_distance(d),
            Op::Airtime(t) => score.add_airtime(t),
            Op::Tricks(p) => score.add_trick_points(p),
        }
    }

    #[test]
    fn test_reset_restores_zero_state() {
        let mut score = ScoreSystem::new();
        score.add_distance(1234.0);
        score.add_airtime(2.5);
        score.add_trick_points(240.0);
        score.set_crashed(true);

        score.reset();
        assert_eq!(score, ScoreSystem::default());
        assert_eq!(score.score(), 0);
        assert_eq!(score.distance_meters(), 0);
        assert_eq!(score.airtime_seconds(), 0.0);
        assert_eq!(score.trick_points(), 0);
        assert!(!score.is_crashed());

        // Idempotent
        score.reset();
        assert_eq!(score, ScoreSystem::default());
    }

    #[test]
    fn test_negative_distance_ignored() {
        let mut score = ScoreSystem::new();
        score.add_distance(-50.0);
        assert_eq!(score.distance(), 0.0);
    }

    #[test]
    fn test_fractional_tricks_floored() {
        let mut score = ScoreSystem::new();
        score.add_trick_points(119.9);
        assert_eq!(score.trick_points(), 119);
        score.add_trick_points(-40.0);
        assert_eq!(score.trick_points(), 119);
    }

    #[test]
    fn test_score_formula() {
        let mut score = ScoreSystem::new();
        // 500px -> 10m -> 100 points
        score.add_distance(500.0);
        score.add_airtime(0.5);
        score.add_trick_points(120.0);
        assert_eq!(score.distance_meters(), 10);
        assert_eq!(score.airtime_seconds(), 0.5);
        assert_eq!(score.score(), 100 + 25 + 120);
    }

    #[test]
    fn test_airtime_rounds_to_one_decimal() {
        let mut score = ScoreSystem::new();
        score.add_airtime(0.26);
        assert!((score.airtime_seconds() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_crash_gate_blocks_everything() {
        let mut score = ScoreSystem::new();
        score.add_distance(100.0);
        score.set_crashed(true);
        let frozen = score.clone();

        score.add_distance(100.0);
        score.add_airtime(1.0);
        score.add_trick_points(120.0);
        assert_eq!(score, frozen);

        score.set_crashed(false);
        score.add_trick_points(120.0);
        assert_eq!(score.trick_points(), 120);
    }

    proptest! {
        #[test]
        fn prop_distance_from_zero_is_exact(delta in 0.0f32..100_000.0) {
            let mut score = ScoreSystem::new();
            score.add_distance(delta);
            prop_assert_eq!(score.distance(), delta * DISTANCE_SCALE);
        }

        #[test]
        fn prop_score_monotonic_until_crash(
            before in prop::collection::vec(op_strategy(), 0..40),
            after in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let mut score = ScoreSystem::new();
            let mut last = score.score();
            for op in &before {
                apply(&mut score, op);
                let now = score.score();
                prop_assert!(now >= last);
                last = now;
            }

            score.set_crashed(true);
            for op in &after {
                apply(&mut score, op);
                prop_assert_eq!(score.score(), last);
            }
        }
    }
}
