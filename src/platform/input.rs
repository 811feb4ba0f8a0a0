//! Host input sampling
//!
//! The host reports which controls are held; once per frame the tracker
//! turns that into a [`TickInput`], computing "just pressed" edges by
//! diffing against the previous sample. A press and release that both land
//! between two samples is never seen, and nothing is queued for later.

use crate::sim::TickInput;

/// Logical controls, independent of the device that produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Hop,
    SpinLeft,
    SpinRight,
    Restart,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::Left),
            "ArrowRight" => Some(Control::Right),
            "ArrowUp" | " " => Some(Control::Hop),
            "a" | "A" => Some(Control::SpinLeft),
            "d" | "D" => Some(Control::SpinRight),
            "r" | "R" => Some(Control::Restart),
            _ => None,
        }
    }
}

/// Held state of every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Held {
    left: bool,
    right: bool,
    hop: bool,
    spin_left: bool,
    spin_right: bool,
    restart: bool,
}

impl Held {
    fn slot(&mut self, control: Control) -> &mut bool {
        match control {
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Hop => &mut self.hop,
            Control::SpinLeft => &mut self.spin_left,
            Control::SpinRight => &mut self.spin_right,
            Control::Restart => &mut self.restart,
        }
    }
}

/// Turns held controls into per-tick input with edges
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    current: Held,
    previous: Held,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, control: Control, down: bool) {
        *self.current.slot(control) = down;
    }

    /// Convenience for key events; returns whether the key was mapped
    pub fn set_key(&mut self, key: &str, down: bool) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.set(control, down);
                true
            }
            None => false,
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.current = Held::default();
    }

    /// Take this frame's input; call exactly once per tick
    pub fn sample(&mut self) -> TickInput {
        let now = self.current;
        let before = self.previous;
        self.previous = now;

        TickInput {
            left: now.left,
            right: now.right,
            hop_pressed: now.hop && !before.hop,
            spin_left: now.spin_left,
            spin_right: now.spin_right,
            restart_pressed: now.restart && !before.restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_fires_once_per_press() {
        let mut tracker = InputTracker::new();
        tracker.set(Control::Hop, true);
        assert!(tracker.sample().hop_pressed);
        // Still held: no new edge
        assert!(!tracker.sample().hop_pressed);
        assert!(!tracker.sample().hop_pressed);

        tracker.set(Control::Hop, false);
        assert!(!tracker.sample().hop_pressed);
        tracker.set(Control::Hop, true);
        assert!(tracker.sample().hop_pressed);
    }

    #[test]
    fn test_press_between_samples_is_lost() {
        let mut tracker = InputTracker::new();
        tracker.set(Control::Restart, true);
        tracker.set(Control::Restart, false);
        assert!(!tracker.sample().restart_pressed);
    }

    #[test]
    fn test_held_controls_are_levels() {
        let mut tracker = InputTracker::new();
        tracker.set(Control::Left, true);
        tracker.set(Control::SpinRight, true);
        for _ in 0..3 {
            let input = tracker.sample();
            assert!(input.left);
            assert!(input.spin_right);
            assert!(!input.right);
        }
        tracker.release_all();
        assert_eq!(tracker.sample(), TickInput::default());
    }

    #[test]
    fn test_release_and_repress_before_sample_keeps_hold() {
        let mut tracker = InputTracker::new();
        tracker.set(Control::Hop, true);
        assert!(tracker.sample().hop_pressed);

        // Re-asserted every frame: the tracker only sees a continuous hold
        for _ in 0..3 {
            tracker.release_all();
            tracker.set(Control::Hop, true);
            assert!(!tracker.sample().hop_pressed);
        }

        tracker.release_all();
        assert!(!tracker.sample().hop_pressed);
        tracker.set(Control::Hop, true);
        assert!(tracker.sample().hop_pressed);
    }

    #[test]
    fn test_key_mapping() {
        let mut tracker = InputTracker::new();
        assert!(tracker.set_key("ArrowUp", true));
        assert!(tracker.set_key("d", true));
        assert!(!tracker.set_key("Escape", true));

        let input = tracker.sample();
        assert!(input.hop_pressed);
        assert!(input.spin_right);
        assert_eq!(Control::from_key("R"), Some(Control::Restart));
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::Left));
    }
}
