//! Snow Dash entry point
//!
//! The browser build is driven by the page through `platform::web`. The
//! native build runs a headless demo: a simple autopilot rides for a minute
//! of simulated time and logs the HUD and run events.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snow Dash (native) starting headless demo...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use snow_dash::platform::{Control, InputTracker};
    use snow_dash::sim::{EntityKind, PlayerState, RunEvent, RunState, advance};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEMO_SECONDS: f32 = 60.0;
    /// Hop when the nearest obstacle is this close ahead
    const HOP_LOOKAHEAD: f32 = 120.0;
    /// Aim for a full rotation on long flights
    const TARGET_SPIN: f32 = 360.0;
    /// Climbing faster than a hop means a pad launched us
    const PAD_LAUNCH_CUTOFF: f32 = 600.0;

    pub fn run() {
        let mut state = RunState::new(0x5eed);
        let mut input = InputTracker::new();
        let mut best = 0u64;
        let frames = (DEMO_SECONDS / FRAME_DT) as u32;

        for frame in 0..frames {
            steer(&state, &mut input);
            let tick_input = input.sample();
            advance(&mut state, &tick_input, FRAME_DT);

            for event in state.drain_events() {
                match event {
                    RunEvent::Crashed { cause, final_score } => {
                        best = best.max(final_score);
                        println!("Crashed ({cause:?}) - final score {final_score}");
                    }
                    RunEvent::Landed { trick_units, points } if trick_units > 0 => {
                        println!("Trick! {trick_units} x 180 for {points} points");
                    }
                    other => log::debug!("{other:?}"),
                }
            }

            if frame % 60 == 0 {
                println!("{}", state.snapshot());
            }
        }

        best = best.max(state.score.score());
        println!("Runs: {}   Best score: {best}", state.run_count);
        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => log::debug!("Final snapshot:\n{json}"),
            Err(err) => log::warn!("Snapshot serialization failed: {err}"),
        }
    }

    /// Autopilot: restart after crashes, hop obstacles, spin on pad launches
    fn steer(state: &RunState, input: &mut InputTracker) {
        // Controls stay held only while the autopilot asks for them; a held
        // Hop or Restart still fires a single edge
        input.release_all();

        if state.is_crashed() {
            input.set(Control::Restart, true);
            return;
        }

        let player = &state.player;
        let front = player.pos.x + player.size.x / 2.0;
        let obstacle_ahead = state
            .entities()
            .filter(|e| e.kind == EntityKind::Obstacle)
            .any(|e| {
                let gap = e.bounds.min().x - front;
                (0.0..HOP_LOOKAHEAD).contains(&gap)
            });

        match player.state() {
            PlayerState::Riding if obstacle_ahead => input.set(Control::Hop, true),
            PlayerState::Airborne if player.spin_this_air() < TARGET_SPIN => {
                // Only pad launches stay up long enough for a full turn
                let spinning = player.spin_this_air() > 0.0;
                if spinning || player.vel.y < -PAD_LAUNCH_CUTOFF {
                    input.set(Control::SpinRight, true);
                }
            }
            _ => {}
        }
    }
}
