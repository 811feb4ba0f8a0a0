//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (held keys to per-tick edges)
//! - Browser bindings (wasm32 only)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Control, InputTracker};
