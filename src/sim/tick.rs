//! Per-frame simulation step
//!
//! Advances a run by the real elapsed time of one frame: scroll the world,
//! recycle and spawn entities, move the rider, resolve collisions and
//! landings, and feed the score.

use super::player::PlayerStep;
use super::state::{CrashCause, RunEvent, RunPhase, RunState};
use crate::consts::*;

/// Logical inputs for a single tick
///
/// Held controls are level-triggered; `hop_pressed` and `restart_pressed`
/// are edges computed by the host (see [`crate::platform::input`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Carve left (held)
    pub left: bool,
    /// Carve right (held)
    pub right: bool,
    /// Hop (pressed this tick)
    pub hop_pressed: bool,
    /// Spin counter-clockwise (held)
    pub spin_left: bool,
    /// Spin clockwise (held)
    pub spin_right: bool,
    /// Restart after a crash (pressed this tick)
    pub restart_pressed: bool,
}

/// Whole trick units in a flight's spin
#[inline]
pub fn trick_units(spin_degrees: f32) -> u32 {
    if !spin_degrees.is_finite() || spin_degrees <= 0.0 {
        return 0;
    }
    (spin_degrees / TRICK_UNIT_DEG).floor() as u32
}

/// Whether a pad should launch a rider moving with vertical speed `vel_y`
#[inline]
pub fn pad_boosts(vel_y: f32) -> bool {
    vel_y > PAD_BOOST_MAX_VY
}

/// Advance the run by `dt` seconds of real frame time
pub fn advance(state: &mut RunState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    if state.phase == RunPhase::Crashed {
        if input.restart_pressed {
            restart(state);
        }
        return;
    }

    state.run_time += dt;

    // Speed ramp
    state.speed = (state.speed + state.tuning.speed_ramp * dt).min(state.tuning.speed_max);

    // Scroll
    let moved = state.speed * dt;
    state.background_offset += moved * BACKGROUND_PARALLAX;
    state.score.add_distance(moved);

    scroll_entities(state, moved);

    // Spawn ahead
    state.spawn_distance += moved;
    if state.spawn_distance > state.tuning.spawn_spacing {
        state.spawn_distance = 0.0;
        let x = state.tuning.viewport_width + SPAWN_AHEAD;
        state.spawn_at(x);
    }

    // Rider body against the ground
    let grounded = state.player.integrate(dt, &state.tuning);

    if resolve_collisions(state) {
        return;
    }

    if !grounded {
        state.score.add_airtime(dt);
    }

    let step = state.player.update(dt, grounded, input, &state.tuning);
    if step.took_off {
        log::debug!("Takeoff at x={:.0}", state.player.pos.x);
        state.events.push(RunEvent::Takeoff);
    }

    if grounded {
        resolve_landing(state, &step);
    }
}

/// Translate every entity left and drop the ones past the left edge
fn scroll_entities(state: &mut RunState, moved: f32) {
    for entity in state.obstacles.iter_mut().chain(state.jump_pads.iter_mut()) {
        entity.bounds.center.x -= moved;
        if entity.bounds.center.x < CULL_X {
            entity.alive = false;
        }
    }
    state.sweep_dead();
}

/// Obstacle and pad overlaps. Returns true if the rider crashed.
fn resolve_collisions(state: &mut RunState) -> bool {
    let body = state.player.body();

    let hit = state
        .obstacles
        .iter_mut()
        .find(|o| o.alive && o.bounds.overlaps(&body));
    if let Some(obstacle) = hit {
        // The obstacle is destroyed along with the run
        obstacle.alive = false;
        log::debug!("Obstacle {} hit", obstacle.id);
        state.sweep_dead();
        crash(state, CrashCause::Obstacle);
        return true;
    }

    let mut consumed = 0;
    for pad in state.jump_pads.iter_mut().filter(|p| p.alive) {
        if !pad.bounds.overlaps(&body) {
            continue;
        }
        if pad_boosts(state.player.vel.y) {
            state.player.vel.y = -state.tuning.pad_launch_velocity;
            state.player.vel.x = (state.player.vel.x + state.tuning.pad_forward_boost)
                .clamp(-state.tuning.max_velocity_x, state.tuning.max_velocity_x);
            log::debug!("Pad {} boost", pad.id);
            state.events.push(RunEvent::PadBoost);
        }
        pad.alive = false;
        consumed += 1;
        state.events.push(RunEvent::PadConsumed);
    }
    if consumed > 0 {
        state.sweep_dead();
    }

    false
}

/// Landing safety and trick scoring on a grounded tick
fn resolve_landing(state: &mut RunState, step: &PlayerStep) {
    let angle = step.touchdown_angle.unwrap_or(state.player.angle);
    if angle.abs() > state.tuning.safe_landing_deg {
        log::debug!("Unsafe landing at {angle:.1} degrees");
        crash(state, CrashCause::BadLanding);
        return;
    }

    // The flight's spin is only read on the tick the rider touches down
    if !step.landed() {
        return;
    }

    let units = trick_units(step.spin_degrees);
    let points = units.saturating_mul(state.tuning.trick_unit_points);
    if units > 0 {
        state.score.add_trick_points(points as f32);
        state.player.level();
    }
    log::debug!("Landed: spin {:.0} degrees, {units} trick units", step.spin_degrees);
    state.events.push(RunEvent::Landed {
        trick_units: units,
        points,
    });
}

/// Running -> Crashed. Freezes the run; repeated calls are ignored.
pub fn crash(state: &mut RunState, cause: CrashCause) {
    if state.phase == RunPhase::Crashed {
        return;
    }
    state.phase = RunPhase::Crashed;
    state.score.set_crashed(true);
    state.player.set_crashed();

    let final_score = state.score.score();
    log::info!(
        "Crashed ({cause:?}): score {final_score}, distance {}m",
        state.score.distance_meters()
    );
    state.events.push(RunEvent::Crashed { cause, final_score });
}

/// Crashed -> Running with a fresh course
pub fn restart(state: &mut RunState) {
    state.start_run();
    log::info!("Run {} started", state.run_count);
    state.events.push(RunEvent::Restarted);
}
