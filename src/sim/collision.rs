//! Axis-aligned collision for the rider, world entities and the ground
//!
//! Everything in the run is an axis-aligned rectangle described by its
//! centre and size. The ground is a static line the rider can rest on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (centre + full size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max().y
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Result of resolving a body against the ground line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Whether the body is resting on the ground
    pub grounded: bool,
    /// Vertical correction to apply to the body centre
    pub correction: f32,
}

impl GroundContact {
    pub fn none() -> Self {
        Self {
            grounded: false,
            correction: 0.0,
        }
    }
}

/// Resolve a falling body against the ground line at `ground_y`
///
/// A body moving upward passes through untouched so hops and pad launches
/// are never snapped back down. A body whose bottom sits exactly on the
/// line counts as grounded.
pub fn resolve_ground(body: &Aabb, vel_y: f32, ground_y: f32) -> GroundContact {
    let penetration = body.bottom() - ground_y;
    if vel_y < 0.0 || penetration < 0.0 {
        return GroundContact::none();
    }
    GroundContact {
        grounded: true,
        correction: -penetration,
    }
}

/// Clamp a body horizontally into [0, width]; returns the corrected centre x
/// and whether it was blocked
pub fn clamp_to_bounds_x(body: &Aabb, width: f32) -> (f32, bool) {
    let half = body.half().x;
    if body.center.x - half < 0.0 {
        (half, true)
    } else if body.center.x + half > width {
        (width - half, true)
    } else {
        (body.center.x, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(8.0, 0.0, 10.0, 10.0)));
        assert!(a.overlaps(&rect(0.0, 0.0, 2.0, 2.0)));
        assert!(!a.overlaps(&rect(20.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_resolve_ground_snaps_falling_body() {
        // Bottom at 105, ground at 100
        let body = rect(0.0, 70.0, 10.0, 70.0);
        let contact = resolve_ground(&body, 30.0, 100.0);
        assert!(contact.grounded);
        assert!((contact.correction + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_resolve_ground_resting_exactly() {
        let body = rect(0.0, 64.0, 10.0, 72.0);
        let contact = resolve_ground(&body, 0.0, 100.0);
        assert!(contact.grounded);
        assert_eq!(contact.correction, 0.0);
    }

    #[test]
    fn test_resolve_ground_ignores_rising_and_airborne() {
        let body = rect(0.0, 70.0, 10.0, 70.0);
        assert!(!resolve_ground(&body, -520.0, 100.0).grounded);

        let high = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!resolve_ground(&high, 100.0, 100.0).grounded);
    }

    #[test]
    fn test_clamp_to_bounds_x() {
        let body = rect(10.0, 0.0, 64.0, 72.0);
        assert_eq!(clamp_to_bounds_x(&body, 960.0), (32.0, true));

        let body = rect(950.0, 0.0, 64.0, 72.0);
        assert_eq!(clamp_to_bounds_x(&body, 960.0), (928.0, true));

        let body = rect(240.0, 0.0, 64.0, 72.0);
        assert_eq!(clamp_to_bounds_x(&body, 960.0), (240.0, false));
    }
}
