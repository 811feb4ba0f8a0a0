//! Browser host binding
//!
//! The page owns the canvas, the animation frame loop and sound. It forwards
//! key events, calls `advance` once per frame with the measured delta, and
//! renders from the JSON snapshot. Events (crash, restart, pad boost...) come
//! back through `drain_events_json` so the page can play its click sounds.

use wasm_bindgen::prelude::*;

use super::input::InputTracker;
use crate::sim::{RunState, advance};
use crate::tuning::Tuning;

/// Longest frame the page may report; longer gaps (tab switches) are clipped
const MAX_FRAME_DT: f32 = 0.1;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Snow Dash core loaded");
}

/// A run driven by the page
#[wasm_bindgen]
pub struct WebRun {
    state: RunState,
    input: InputTracker,
}

#[wasm_bindgen]
impl WebRun {
    /// Start a run. Without a seed, the current time is used.
    ///
    /// `tuning_json` is a debugging aid for balancing in the browser; normal
    /// pages pass nothing and play with the built-in constants.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, tuning_json: Option<String>) -> WebRun {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let tuning = tuning_json
            .as_deref()
            .map(Tuning::from_json_or_default)
            .unwrap_or_default();

        WebRun {
            state: RunState::with_tuning(seed, tuning),
            input: InputTracker::new(),
        }
    }

    /// Forward a `keydown`/`keyup`; returns whether the key is used by the game
    pub fn set_key(&mut self, key: &str, down: bool) -> bool {
        self.input.set_key(key, down)
    }

    /// Release all keys (window blur)
    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    /// Advance by one animation frame
    pub fn advance(&mut self, dt_seconds: f32) {
        let input = self.input.sample();
        advance(&mut self.state, &input, dt_seconds.min(MAX_FRAME_DT));
    }

    /// Restart immediately (overlay button)
    pub fn restart(&mut self) {
        crate::sim::restart(&mut self.state);
    }

    pub fn is_crashed(&self) -> bool {
        self.state.is_crashed()
    }

    pub fn score(&self) -> f64 {
        self.state.score.score() as f64
    }

    pub fn hud_text(&self) -> String {
        self.state.snapshot().to_string()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|err| {
            log::warn!("Snapshot serialization failed: {err}");
            String::from("null")
        })
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        let events = self.state.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|err| {
            log::warn!("Event serialization failed: {err}");
            String::from("[]")
        })
    }
}
