//! Game balance and tuning
//!
//! The constants in [`crate::consts`] are the game's balance; every field
//! here defaults to one of them. A host may hand in a JSON override as a
//! debugging and balancing aid; missing fields keep their defaults. Only
//! the physics, pacing and scoring values below are covered: lean, entity
//! geometry, culling, distance scale and spawn roll thresholds stay fixed.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable physics, pacing and scoring values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub gravity: f32,

    // === Rider ===
    pub carve_accel: f32,
    pub drag_x: f32,
    pub max_velocity_x: f32,
    pub max_velocity_y: f32,
    pub hop_velocity: f32,
    /// Degrees per second while a spin key is held
    pub spin_rate_deg: f32,

    // === Pacing ===
    pub speed_base: f32,
    pub speed_max: f32,
    pub speed_ramp: f32,
    pub spawn_spacing: f32,

    // === Pads ===
    pub pad_launch_velocity: f32,
    pub pad_forward_boost: f32,

    // === Landing & tricks ===
    pub safe_landing_deg: f32,
    pub trick_unit_points: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            gravity: GRAVITY,

            carve_accel: CARVE_ACCEL,
            drag_x: DRAG_X,
            max_velocity_x: MAX_VELOCITY_X,
            max_velocity_y: MAX_VELOCITY_Y,
            hop_velocity: HOP_VELOCITY,
            spin_rate_deg: SPIN_RATE_DEG,

            speed_base: SPEED_BASE,
            speed_max: SPEED_MAX,
            speed_ramp: SPEED_RAMP,
            spawn_spacing: SPAWN_SPACING,

            pad_launch_velocity: PAD_LAUNCH_VELOCITY,
            pad_forward_boost: PAD_FORWARD_BOOST,

            safe_landing_deg: SAFE_LANDING_DEG,
            trick_unit_points: TRICK_UNIT_POINTS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Parse an override, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring invalid tuning override: {err}");
                Self::default()
            }
        }
    }

    /// Repair values that would break the simulation's invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: f32, fallback: f32| {
            if value.is_finite() && value >= 0.0 { value } else { fallback }
        };

        self.viewport_width = fix(self.viewport_width, defaults.viewport_width).max(PLAYER_WIDTH);
        self.viewport_height =
            fix(self.viewport_height, defaults.viewport_height).max(PLAYER_HEIGHT);
        self.gravity = fix(self.gravity, defaults.gravity);
        self.carve_accel = fix(self.carve_accel, defaults.carve_accel);
        self.drag_x = fix(self.drag_x, defaults.drag_x);
        self.max_velocity_x = fix(self.max_velocity_x, defaults.max_velocity_x);
        self.max_velocity_y = fix(self.max_velocity_y, defaults.max_velocity_y);
        self.hop_velocity = fix(self.hop_velocity, defaults.hop_velocity);
        self.spin_rate_deg = fix(self.spin_rate_deg, defaults.spin_rate_deg);
        self.speed_base = fix(self.speed_base, defaults.speed_base);
        self.speed_max = fix(self.speed_max, defaults.speed_max).max(self.speed_base);
        self.speed_ramp = fix(self.speed_ramp, defaults.speed_ramp);
        self.pad_launch_velocity = fix(self.pad_launch_velocity, defaults.pad_launch_velocity);
        self.pad_forward_boost = fix(self.pad_forward_boost, defaults.pad_forward_boost);
        self.safe_landing_deg = fix(self.safe_landing_deg, defaults.safe_landing_deg).min(180.0);

        // A zero spacing would spawn every tick
        if !(self.spawn_spacing.is_finite() && self.spawn_spacing > 0.0) {
            self.spawn_spacing = defaults.spawn_spacing;
        }

        self
    }

    /// Ground line in screen space
    pub fn ground_y(&self) -> f32 {
        crate::ground_y_for(self.viewport_height)
    }

    /// Rider spawn x
    pub fn player_start_x(&self) -> f32 {
        (self.viewport_width * PLAYER_START_FRACTION).floor()
    }
}
