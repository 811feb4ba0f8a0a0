//! Rider state machine and body
//!
//! The rider is Riding, Airborne or Crashed. Crashed is absorbing: only
//! `reset` brings the rider back. All state changes go through
//! [`Player::transition`], which refuses anything out of Crashed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, clamp_to_bounds_x, resolve_ground};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{lerp, wrap_degrees};

/// Rider state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// On the ground, carving
    #[default]
    Riding,
    /// Off the ground; spin keys rotate the rider
    Airborne,
    /// Hit something or landed badly; waits for a reset
    Crashed,
}

/// What one rider update produced, for the run controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerStep {
    /// Spin accumulated during the current (or just finished) flight
    pub spin_degrees: f32,
    /// Set on the tick the rider lands: orientation at touchdown, before levelling
    pub touchdown_angle: Option<f32>,
    /// Set on the tick the rider leaves the ground
    pub took_off: bool,
}

impl PlayerStep {
    pub fn landed(&self) -> bool {
        self.touchdown_angle.is_some()
    }
}

/// The rider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Body centre (screen space, y down)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Horizontal acceleration from carving
    pub accel_x: f32,
    /// Orientation in degrees, wrapped to [-180, 180)
    pub angle: f32,
    pub size: Vec2,
    state: PlayerState,
    /// Absolute rotation gathered during the current flight
    spin_this_air: f32,
    tint: u32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            accel_x: 0.0,
            angle: 0.0,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            state: PlayerState::Riding,
            spin_this_air: 0.0,
            tint: TINT_NORMAL,
        }
    }

    /// Rider placed with its body resting on the ground line
    pub fn on_ground(x: f32, ground_y: f32) -> Self {
        Self::new(x, ground_y - PLAYER_HEIGHT / 2.0)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_crashed(&self) -> bool {
        self.state == PlayerState::Crashed
    }

    pub fn spin_this_air(&self) -> f32 {
        self.spin_this_air
    }

    /// Sprite tint (damaged riders render red)
    pub fn tint(&self) -> u32 {
        self.tint
    }

    pub fn body(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Guarded state change; returns whether it happened
    fn transition(&mut self, to: PlayerState) -> bool {
        use PlayerState::*;

        let allowed = match (self.state, to) {
            (Crashed, _) => false,
            (Riding, Airborne) | (Airborne, Riding) => true,
            (Riding | Airborne, Crashed) => true,
            _ => false,
        };
        if allowed {
            self.state = to;
        }
        allowed
    }

    pub fn reset(&mut self, x: f32, y: f32) {
        self.state = PlayerState::Riding;
        self.spin_this_air = 0.0;
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::ZERO;
        self.accel_x = 0.0;
        self.angle = 0.0;
        self.tint = TINT_NORMAL;
    }

    pub fn set_crashed(&mut self) {
        self.transition(PlayerState::Crashed);
        self.vel = Vec2::ZERO;
        self.accel_x = 0.0;
        self.tint = TINT_DAMAGED;
    }

    /// Riding -> Airborne; starts a fresh spin count
    pub fn on_takeoff(&mut self) -> bool {
        if self.transition(PlayerState::Airborne) {
            self.spin_this_air = 0.0;
            true
        } else {
            false
        }
    }

    /// Airborne -> Riding; levels the rider and returns the touchdown angle
    pub fn on_land(&mut self) -> Option<f32> {
        if self.transition(PlayerState::Riding) {
            let touchdown = self.angle;
            self.angle = 0.0;
            Some(touchdown)
        } else {
            None
        }
    }

    /// Level the rider (after a trick is scored)
    pub fn level(&mut self) {
        self.angle = 0.0;
    }

    /// Apply controls for one tick and track air state
    pub fn update(
        &mut self,
        dt: f32,
        grounded: bool,
        input: &TickInput,
        tuning: &Tuning,
    ) -> PlayerStep {
        if self.is_crashed() {
            return PlayerStep::default();
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut step = PlayerStep::default();

        // Carving
        let carve = input.right as i32 - input.left as i32;
        self.accel_x = carve as f32 * tuning.carve_accel;

        // Hop (edge-triggered, ground only)
        if grounded && input.hop_pressed {
            self.vel.y = -tuning.hop_velocity;
        }

        // Air state
        if !grounded && self.state != PlayerState::Airborne {
            step.took_off = self.on_takeoff();
        }
        if grounded && self.state == PlayerState::Airborne {
            step.touchdown_angle = self.on_land();
        }

        if self.state == PlayerState::Airborne {
            let spin_dir = input.spin_right as i32 - input.spin_left as i32;
            let delta = spin_dir as f32 * tuning.spin_rate_deg * dt;
            if delta != 0.0 {
                self.spin_this_air += delta.abs();
                self.angle = wrap_degrees(self.angle + delta);
            }
        } else {
            let target = (self.vel.x * LEAN_PER_VELOCITY).clamp(-MAX_LEAN_DEG, MAX_LEAN_DEG);
            self.angle = lerp(self.angle, target, LEAN_BLEND);
        }

        step.spin_degrees = self.spin_this_air;
        step
    }

    /// Arcade body step: gravity, drag, speed caps, bounds and ground.
    /// Returns whether the rider is on the ground afterwards.
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) -> bool {
        if self.is_crashed() {
            return false;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.accel_x != 0.0 {
            self.vel.x += self.accel_x * dt;
        } else if tuning.drag_x > 0.0 {
            let drag = tuning.drag_x * dt;
            self.vel.x = if self.vel.x.abs() <= drag {
                0.0
            } else {
                self.vel.x - drag * self.vel.x.signum()
            };
        }
        self.vel.y += tuning.gravity * dt;

        self.vel.x = self.vel.x.clamp(-tuning.max_velocity_x, tuning.max_velocity_x);
        self.vel.y = self.vel.y.clamp(-tuning.max_velocity_y, tuning.max_velocity_y);

        self.pos += self.vel * dt;

        let (x, blocked) = clamp_to_bounds_x(&self.body(), tuning.viewport_width);
        if blocked {
            self.pos.x = x;
            self.vel.x = 0.0;
        }

        let half_h = self.size.y / 2.0;
        if self.pos.y - half_h < 0.0 {
            self.pos.y = half_h;
            self.vel.y = self.vel.y.max(0.0);
        }

        let contact = resolve_ground(&self.body(), self.vel.y, tuning.ground_y());
        if contact.grounded {
            self.pos.y += contact.correction;
            self.vel.y = 0.0;
        }
        contact.grounded
    }
}
