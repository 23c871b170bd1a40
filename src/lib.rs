//! Fishbowl - steering and chain-following animation core
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (steering, appendage chains, scene tick)
//! - `geometry`: Read-only geometry snapshots for an external renderer
//! - `settings`: Tunables, revision presets and JSON config loading

pub mod geometry;
pub mod settings;
pub mod sim;

pub use geometry::SceneGeometry;
pub use settings::{Preset, Settings, SettingsError};

/// 2D vector used throughout the simulation
pub type Vector2 = glam::DVec2;

/// Default tunables (the "fish" revision of the sketch)
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f64 = 800.0;
    pub const WORLD_HEIGHT: f64 = 600.0;
    /// White space beyond the visible edge before wrapping
    pub const WRAP_MARGIN: f64 = 300.0;

    /// Steering
    pub const MAX_SPEED: f64 = 10.0;
    pub const MAX_FORCE: f64 = 0.2;
    /// Below this distance the agent starts slowing down
    pub const ARRIVAL_RADIUS: f64 = 500.0;
    /// Distance at which the slowdown ramp reaches full speed
    pub const SLOWDOWN_RADIUS: f64 = 200.0;

    /// Wander circle
    pub const WANDER_RADIUS: f64 = 5.0;
    pub const WANDER_DISTANCE: f64 = 125.0;
    /// Max random change to the wander angle per frame (radians)
    pub const WANDER_CHANGE: f64 = 0.25;

    /// Tails
    pub const TAIL_JOINTS: usize = 20;
    pub const TAIL_SEGMENT_LENGTH: f64 = 20.0;

    /// Food particle radius used for the mouth hit test
    pub const FOOD_RADIUS: f64 = 10.0;

    /// Below this length a direction is treated as undefined
    pub const DEGENERATE_LENGTH: f64 = 1e-9;
}

/// Normalized angle to [-π, π)
///
/// Non-finite input stays non-finite.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU);
    // rem_euclid can round a tiny negative remainder up to TAU
    if wrapped >= TAU { -PI } else { wrapped - PI }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> Vector2 {
    Vector2::new(r * theta.cos(), r * theta.sin())
}

/// Heading of a vector in radians against +x, `None` for a (near) zero vector
#[inline]
pub fn heading(v: Vector2) -> Option<f64> {
    if v.length() <= consts::DEGENERATE_LENGTH {
        None
    } else {
        Some(v.y.atan2(v.x))
    }
}

/// Heading in degrees, `None` for a (near) zero vector
#[inline]
pub fn heading_degrees(v: Vector2) -> Option<f64> {
    heading(v).map(f64::to_degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert_abs_diff_eq!(normalize_angle(3.0 * PI), -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(2.5 * PI), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-3.5 * PI), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_huge_angle_terminates() {
        for angle in [1e17, -1e17, f64::MAX, -f64::MAX] {
            let normalized = normalize_angle(angle);
            assert!((-PI..PI).contains(&normalized), "{angle} -> {normalized}");
        }
        assert!(normalize_angle(f64::INFINITY).is_nan());
        assert!(normalize_angle(f64::NEG_INFINITY).is_nan());
        assert!(normalize_angle(f64::NAN).is_nan());
    }

    #[test]
    fn test_heading() {
        assert_eq!(heading(Vector2::ZERO), None);
        assert_abs_diff_eq!(heading(Vector2::new(0.0, 2.0)).unwrap(), PI / 2.0, epsilon = 1e-12);
        let degrees = heading_degrees(Vector2::new(-1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(degrees, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        assert_eq!(Vector2::ZERO.normalize_or_zero(), Vector2::ZERO);
    }
}
