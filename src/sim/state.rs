//! Run state and core simulation types
//!
//! Everything a run owns lives in [`RunState`]: the rider, the score, the
//! two entity arenas and the pacing counters. Hosts read it through
//! [`RunState::snapshot`] and react to [`RunEvent`]s.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::player::{Player, PlayerState};
use super::score::ScoreSystem;
use super::spawner::WorldSpawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// World scrolling, rider in control
    #[default]
    Running,
    /// Everything frozen until a restart
    Crashed,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Rider body overlapped an obstacle
    Obstacle,
    /// Touched down tilted past the safe landing angle
    BadLanding,
}

/// Spawned entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    JumpPad,
}

/// An obstacle or jump pad scrolling toward the rider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable handle, unique within a run state
    pub id: u32,
    pub kind: EntityKind,
    pub bounds: Aabb,
    /// Cleared when consumed, crashed into or scrolled off; swept afterwards
    pub alive: bool,
}

impl Entity {
    pub fn x(&self) -> f32 {
        self.bounds.center.x
    }
}

/// Observable things that happened during a tick
///
/// Hosts drain these to drive sounds, overlays and other side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    Takeoff,
    Landed { trick_units: u32, points: u32 },
    /// A pad launched the rider
    PadBoost,
    /// A pad was used up (with or without a boost)
    PadConsumed,
    Crashed { cause: CrashCause, final_score: u64 },
    Restarted,
}

/// Rider view for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
    pub state: PlayerState,
    pub tint: u32,
}

/// Entity view for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Immutable per-tick summary for the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub score: u64,
    pub distance_m: u32,
    pub airtime_s: f32,
    pub trick_points: u32,
    pub phase: RunPhase,
    pub speed: f32,
    pub background_offset: f32,
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
}

impl fmt::Display for RunSnapshot {
    /// HUD line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {}   Distance: {}m   Airtime: {:.1}s   Tricks: {}",
            self.score, self.distance_m, self.airtime_s, self.trick_points
        )
    }
}

/// Complete state of one run (and the runs that follow it after restarts)
#[derive(Debug, Clone)]
pub struct RunState {
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub player: Player,
    pub score: ScoreSystem,
    /// Live obstacles (unordered)
    pub obstacles: Vec<Entity>,
    /// Live jump pads (unordered)
    pub jump_pads: Vec<Entity>,
    /// Current scroll speed (pixels/s)
    pub speed: f32,
    /// Scroll distance since the last spawn slot
    pub spawn_distance: f32,
    /// Background texture scroll
    pub background_offset: f32,
    /// Seconds simulated in the current run
    pub run_time: f32,
    /// Number of runs started (1 for the first)
    pub run_count: u32,
    pub(crate) spawner: WorldSpawner,
    pub(crate) events: Vec<RunEvent>,
    next_id: u32,
}

impl RunState {
    /// Create a running state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let player = Player::on_ground(tuning.player_start_x(), tuning.ground_y());
        let mut state = Self {
            phase: RunPhase::Running,
            player,
            score: ScoreSystem::new(),
            obstacles: Vec::new(),
            jump_pads: Vec::new(),
            speed: tuning.speed_base,
            spawn_distance: 0.0,
            background_offset: 0.0,
            run_time: 0.0,
            run_count: 0,
            spawner: WorldSpawner::new(seed),
            events: Vec::new(),
            next_id: 1,
            tuning,
        };

        state.start_run();
        log::info!("Run started (seed {seed})");
        state
    }

    /// Put every piece of run state back to its initial value
    pub(crate) fn start_run(&mut self) {
        self.phase = RunPhase::Running;
        self.score.reset();
        self.speed = self.tuning.speed_base;
        self.spawn_distance = 0.0;
        self.background_offset = 0.0;
        self.run_time = 0.0;
        self.run_count += 1;

        self.obstacles.clear();
        self.jump_pads.clear();

        let start_x = self.tuning.player_start_x();
        let ground_y = self.tuning.ground_y();
        self.player.reset(start_x, ground_y - self.player.size.y / 2.0);

        for i in 0..INITIAL_SPAWN_SETS {
            let x = self.tuning.viewport_width + i as f32 * self.tuning.spawn_spacing;
            self.spawn_at(x);
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Roll one spawn slot and add whatever it produced
    pub fn spawn_at(&mut self, x_offset: f32) {
        let set = self.spawner.spawn_set(x_offset, self.tuning.ground_y());
        if let Some(bounds) = set.pad {
            let id = self.next_entity_id();
            self.jump_pads.push(Entity {
                id,
                kind: EntityKind::JumpPad,
                bounds,
                alive: true,
            });
        }
        if let Some(bounds) = set.obstacle {
            let id = self.next_entity_id();
            self.obstacles.push(Entity {
                id,
                kind: EntityKind::Obstacle,
                bounds,
                alive: true,
            });
        }
    }

    /// Drop entities whose `alive` flag was cleared
    pub fn sweep_dead(&mut self) {
        self.obstacles.retain(|e| e.alive);
        self.jump_pads.retain(|e| e.alive);
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    pub fn is_crashed(&self) -> bool {
        self.phase == RunPhase::Crashed
    }

    pub fn ground_y(&self) -> f32 {
        self.tuning.ground_y()
    }

    /// Events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[RunEvent] {
        &self.events
    }

    /// All live entities, obstacles first, each group ordered by id
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.obstacles.iter().chain(self.jump_pads.iter()).filter(|e| e.alive)
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let mut entities: Vec<EntityView> = self
            .entities()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                pos: e.bounds.center,
                size: e.bounds.size,
            })
            .collect();
        entities.sort_by_key(|e| e.id);

        RunSnapshot {
            score: self.score.score(),
            distance_m: self.score.distance_meters(),
            airtime_s: self.score.airtime_seconds(),
            trick_points: self.score.trick_points(),
            phase: self.phase,
            speed: self.speed,
            background_offset: self.background_offset,
            player: PlayerView {
                pos: self.player.pos,
                size: self.player.size,
                angle: self.player.angle,
                state: self.player.state(),
                tint: self.player.tint(),
            },
            entities,
        }
    }
}
