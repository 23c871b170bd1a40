//! Shape generation for 2D primitives

use std::f64::consts::TAU;

use crate::Vector2;

/// Catmull-Rom curve through `points`
///
/// Emits `samples_per_segment` points per span (starting at each control
/// point) and finishes on the last control point, so the curve passes through
/// every joint.
pub fn smooth(points: &[Vector2], samples_per_segment: usize) -> Vec<Vector2> {
    if points.len() < 3 || samples_per_segment < 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut curve = Vec::with_capacity(last * samples_per_segment + 1);

    for i in 0..last {
        // Clamp the outer control points at the ends of the chain
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        for s in 0..samples_per_segment {
            let t = s as f64 / samples_per_segment as f64;
            curve.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    curve.push(points[last]);

    curve
}

#[inline]
fn catmull_rom(p0: Vector2, p1: Vector2, p2: Vector2, p3: Vector2, t: f64) -> Vector2 {
    let t2 = t * t;
    let t3 = t2 * t;
    ((p1 * 2.0)
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p3 - p0 + (p1 - p2) * 3.0) * t3)
        * 0.5
}

/// Points around a circle, first point at angle 0
pub fn circle(center: Vector2, radius: f64, segments: u32) -> Vec<Vector2> {
    (0..segments)
        .map(|i| {
            let theta = (i as f64 / segments as f64) * TAU;
            center + Vector2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Total length of a polyline
pub fn polyline_length(points: &[Vector2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_smooth_passes_through_joints() {
        let joints = [
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 5.0),
            Vector2::new(20.0, 0.0),
            Vector2::new(30.0, -5.0),
        ];
        let curve = smooth(&joints, 4);
        assert_eq!(curve.len(), 3 * 4 + 1);
        for (i, joint) in joints.iter().enumerate() {
            let sample = curve[(i * 4).min(curve.len() - 1)];
            assert_abs_diff_eq!(sample.x, joint.x, epsilon = 1e-9);
            assert_abs_diff_eq!(sample.y, joint.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_smooth_straight_line_stays_straight() {
        let joints: Vec<Vector2> = (0..5).map(|i| Vector2::new(0.0, i as f64 * 20.0)).collect();
        let curve = smooth(&joints, 5);
        assert!(curve.iter().all(|p| p.x.abs() < 1e-9));
        assert_abs_diff_eq!(polyline_length(&curve), 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_smooth_short_input_unchanged() {
        let joints = [Vector2::ZERO, Vector2::X];
        assert_eq!(smooth(&joints, 8), joints.to_vec());
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Vector2::new(5.0, -5.0);
        let points = circle(center, 10.0, 16);
        assert_eq!(points.len(), 16);
        for p in points {
            assert_abs_diff_eq!(p.distance(center), 10.0, epsilon = 1e-9);
        }
    }
}
