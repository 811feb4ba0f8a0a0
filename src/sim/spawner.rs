//! Procedural course generation
//!
//! Each spawn slot draws one roll in 1..=100. Low rolls place a jump pad,
//! high rolls place an obstacle a little further on, and the middle band
//! places both (a pad that can carry the rider over the obstacle behind it).
//! The two checks are independent; every slot produces at least one entity.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Entities produced for one spawn slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnSet {
    /// The roll that decided this slot (1..=100)
    pub roll: u32,
    pub pad: Option<Aabb>,
    pub obstacle: Option<Aabb>,
}

impl SpawnSet {
    pub fn count(&self) -> usize {
        self.pad.is_some() as usize + self.obstacle.is_some() as usize
    }
}

/// Whether a roll places a jump pad
#[inline]
pub fn roll_places_pad(roll: u32) -> bool {
    roll <= PAD_ROLL_MAX
}

/// Whether a roll places an obstacle
#[inline]
pub fn roll_places_obstacle(roll: u32) -> bool {
    roll >= OBSTACLE_ROLL_MIN
}

/// Seeded world spawner
#[derive(Debug, Clone)]
pub struct WorldSpawner {
    seed: u64,
    rng: Pcg32,
}

impl WorldSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll one spawn slot at `x_offset`, resting things on `ground_y`
    pub fn spawn_set(&mut self, x_offset: f32, ground_y: f32) -> SpawnSet {
        let roll = self.rng.random_range(1..=100u32);
        let mut set = SpawnSet {
            roll,
            ..Default::default()
        };

        if roll_places_pad(roll) {
            set.pad = Some(Aabb::new(
                Vec2::new(x_offset, ground_y - PAD_LIFT),
                Vec2::new(PAD_WIDTH, PAD_HEIGHT),
            ));
        }

        if roll_places_obstacle(roll) {
            let gap = self.rng.random_range(OBSTACLE_GAP_MIN..=OBSTACLE_GAP_MAX) as f32;
            let height = self.rng.random_range(OBSTACLE_HEIGHT_MIN..=OBSTACLE_HEIGHT_MAX) as f32;
            let width = self.rng.random_range(OBSTACLE_WIDTH_MIN..=OBSTACLE_WIDTH_MAX) as f32;
            set.obstacle = Some(Aabb::new(
                Vec2::new(x_offset + gap, ground_y - height / 2.0),
                Vec2::new(width, height),
            ));
        }

        log::trace!(
            "Spawn slot at x={x_offset}: roll={roll} pad={} obstacle={}",
            set.pad.is_some(),
            set.obstacle.is_some()
        );
        set
    }
}
