//! Snow Dash - An endless-runner snowboarding game
//!
//! Core modules:
//! - `sim`: Simulation (rider physics, tricks, spawning, collisions, scoring)
//! - `platform`: Host input and browser bindings
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default viewport (the simulation runs in screen pixels, y down)
    pub const VIEWPORT_WIDTH: f32 = 960.0;
    pub const VIEWPORT_HEIGHT: f32 = 540.0;
    /// Ground surface as a fraction of viewport height
    pub const GROUND_FRACTION: f32 = 0.78;

    /// Constant downward gravity (pixels/s²)
    pub const GRAVITY: f32 = 1200.0;

    /// Rider collision body
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 72.0;
    /// Rider starts a quarter of the way across the viewport
    pub const PLAYER_START_FRACTION: f32 = 0.25;

    /// Carving acceleration while left/right is held
    pub const CARVE_ACCEL: f32 = 1400.0;
    /// Horizontal drag applied when not carving
    pub const DRAG_X: f32 = 900.0;
    pub const MAX_VELOCITY_X: f32 = 520.0;
    pub const MAX_VELOCITY_Y: f32 = 1200.0;
    /// Upward speed of a hop
    pub const HOP_VELOCITY: f32 = 520.0;

    /// Spin rate while a spin key is held (one rotation per second)
    pub const SPIN_RATE_DEG: f32 = 360.0;
    /// Visual lean per unit of horizontal velocity
    pub const LEAN_PER_VELOCITY: f32 = 0.06;
    pub const MAX_LEAN_DEG: f32 = 18.0;
    /// Per-tick blend toward the target lean
    pub const LEAN_BLEND: f32 = 0.12;

    /// Scroll speed ramp (pixels/s, pixels/s²)
    pub const SPEED_BASE: f32 = 240.0;
    pub const SPEED_MAX: f32 = 560.0;
    pub const SPEED_RAMP: f32 = 18.0;
    /// Background parallax relative to world scroll
    pub const BACKGROUND_PARALLAX: f32 = 0.35;

    /// Entities are dropped once their centre passes this x
    pub const CULL_X: f32 = -80.0;
    /// World distance between spawn slots
    pub const SPAWN_SPACING: f32 = 320.0;
    /// Spawn slots open this far past the right edge
    pub const SPAWN_AHEAD: f32 = 200.0;
    /// Spawn slots populated at the start of a run
    pub const INITIAL_SPAWN_SETS: u32 = 7;

    /// Spawn roll thresholds (fixed, roll is 1..=100)
    pub const PAD_ROLL_MAX: u32 = 55;
    pub const OBSTACLE_ROLL_MIN: u32 = 35;

    /// Jump pad geometry (rests just above the ground line)
    pub const PAD_WIDTH: f32 = 46.0;
    pub const PAD_HEIGHT: f32 = 10.0;
    pub const PAD_LIFT: f32 = 8.0;
    /// Pads only boost when the rider is not already climbing faster than this
    pub const PAD_BOOST_MAX_VY: f32 = -50.0;
    pub const PAD_LAUNCH_VELOCITY: f32 = 780.0;
    pub const PAD_FORWARD_BOOST: f32 = 40.0;

    /// Obstacle spawn ranges (inclusive)
    pub const OBSTACLE_GAP_MIN: u32 = 80;
    pub const OBSTACLE_GAP_MAX: u32 = 140;
    pub const OBSTACLE_HEIGHT_MIN: u32 = 28;
    pub const OBSTACLE_HEIGHT_MAX: u32 = 56;
    pub const OBSTACLE_WIDTH_MIN: u32 = 18;
    pub const OBSTACLE_WIDTH_MAX: u32 = 28;

    /// Landings steeper than this crash the rider
    pub const SAFE_LANDING_DEG: f32 = 25.0;
    /// Degrees of spin per trick unit, and its reward
    pub const TRICK_UNIT_DEG: f32 = 180.0;
    pub const TRICK_UNIT_POINTS: u32 = 120;

    /// Scroll pixels to "meters"
    pub const DISTANCE_SCALE: f32 = 0.02;
    pub const SCORE_PER_METER: f32 = 10.0;
    pub const SCORE_PER_AIR_SECOND: f32 = 50.0;

    /// Rider tint, normal and after a crash
    pub const TINT_NORMAL: u32 = 0xffffff;
    pub const TINT_DAMAGED: u32 = 0xff6b6b;
}

/// Wrap an angle in degrees to [-180, 180)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Linear interpolation
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Ground line for a viewport height
#[inline]
pub fn ground_y_for(viewport_height: f32) -> f32 {
    (viewport_height * consts::GROUND_FRACTION).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(180.0), -180.0);
        assert_eq!(wrap_degrees(-180.0), -180.0);
        assert!((wrap_degrees(360.0 + 24.0) - 24.0).abs() < 1e-4);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
    }

    #[test]
    fn test_ground_y_default_viewport() {
        assert_eq!(ground_y_for(consts::VIEWPORT_HEIGHT), 421.0);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.12) - 1.2).abs() < 1e-6);
        assert_eq!(lerp(5.0, 5.0, 0.5), 5.0);
    }
}
