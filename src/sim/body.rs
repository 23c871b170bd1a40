//! Body outline and food hit testing
//!
//! The outline is authored in local space with the mouth pointing up the
//! screen (-y). At runtime it is rotated by the agent's heading plus a quarter
//! turn so the mouth leads along the direction of travel.

use serde::{Deserialize, Serialize};

use crate::Vector2;

/// Fish silhouette in local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Outline points; index 0 is the mouth, the rest anchor appendages
    pub outline: Vec<Vector2>,
}

impl Default for Body {
    /// V-shaped fish: mouth ahead, two fins behind
    fn default() -> Self {
        Self {
            outline: vec![
                Vector2::new(0.0, -45.0),
                Vector2::new(-30.0, 45.0),
                Vector2::new(30.0, 45.0),
            ],
        }
    }
}

impl Body {
    /// Single-point body (the head of a spine)
    pub fn point() -> Self {
        Self {
            outline: vec![Vector2::ZERO],
        }
    }

    /// Outline point `index` in world space, if it exists
    pub fn anchor(&self, index: usize, position: Vector2, orientation: f64) -> Option<Vector2> {
        self.outline
            .get(index)
            .map(|&local| to_world(local, position, orientation))
    }

    /// Mouth point in world space
    pub fn mouth(&self, position: Vector2, orientation: f64) -> Option<Vector2> {
        self.anchor(0, position, orientation)
    }

    /// Whole outline in world space
    pub fn outline(&self, position: Vector2, orientation: f64) -> Vec<Vector2> {
        self.outline
            .iter()
            .map(|&local| to_world(local, position, orientation))
            .collect()
    }
}

#[inline]
fn to_world(local: Vector2, position: Vector2, orientation: f64) -> Vector2 {
    let rotation = Vector2::from_angle(orientation + std::f64::consts::FRAC_PI_2);
    position + rotation.rotate(local)
}

/// A food particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Vector2,
    pub radius: f64,
}

impl Food {
    pub fn new(position: Vector2, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Point-in-circle hit test
    pub fn contains(&self, point: Vector2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mouth_leads_heading() {
        let body = Body::default();
        let origin = Vector2::new(100.0, 100.0);

        let mouth = body.mouth(origin, 0.0).unwrap();
        assert_abs_diff_eq!(mouth.x, 145.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mouth.y, 100.0, epsilon = 1e-9);

        // Unrotated pose: heading straight up the screen
        let mouth = body.mouth(origin, -std::f64::consts::FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(mouth.x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mouth.y, 55.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fins_trail_mouth() {
        let body = Body::default();
        let outline = body.outline(Vector2::ZERO, 0.0);
        assert_eq!(outline.len(), 3);
        assert!(outline[1].x < outline[0].x);
        assert!(outline[2].x < outline[0].x);
        assert!(body.anchor(3, Vector2::ZERO, 0.0).is_none());
    }

    #[test]
    fn test_food_hit_test() {
        let food = Food::new(Vector2::new(10.0, 10.0), 10.0);
        assert!(food.contains(Vector2::new(10.0, 20.0)));
        assert!(food.contains(Vector2::new(15.0, 15.0)));
        assert!(!food.contains(Vector2::new(21.0, 10.0)));
    }
}
