//! The steered agent and its integration step
//!
//! Forces accumulate into `acceleration` between integrations; `update`
//! applies them once per frame and then clears the accumulator.

use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH, WRAP_MARGIN};
use crate::{Vector2, heading, normalize_angle};

/// Rectangular world with a wrap margin around the visible area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    pub width: f64,
    pub height: f64,
    /// White space beyond each edge before the agent wraps
    pub margin: f64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT, WRAP_MARGIN)
    }
}

impl World {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A steered body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Forces applied since the last update
    pub acceleration: Vector2,
    /// Heading in radians against +x
    pub orientation: f64,
    pub max_speed: f64,
    pub max_force: f64,
    /// Position before the last integration
    previous_position: Vector2,
}

impl Agent {
    /// Create an agent at rest, facing up the screen (-y)
    pub fn new(position: Vector2, max_speed: f64, max_force: f64) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            orientation: -std::f64::consts::FRAC_PI_2,
            max_speed,
            max_force,
            previous_position: position,
        }
    }

    pub fn previous_position(&self) -> Vector2 {
        self.previous_position
    }

    /// Orientation in degrees
    pub fn orientation_degrees(&self) -> f64 {
        self.orientation.to_degrees()
    }

    /// Accumulate a force into this frame's acceleration
    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force;
    }

    /// Integrate one timestep
    ///
    /// Returns the change in orientation (radians, in [-π, π)) so a renderer
    /// can rotate its visual by the delta.
    pub fn update(&mut self) -> f64 {
        self.previous_position = self.position;

        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_length_max(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2::ZERO;

        let last_orientation = self.orientation;
        if let Some(theta) = heading(self.position - self.previous_position) {
            self.orientation = theta;
        }
        let turn = normalize_angle(self.orientation - last_orientation);
        // no defined turn out of a non-finite orientation
        if turn.is_finite() { turn } else { 0.0 }
    }

    /// Toroidal wrap around the world margin
    ///
    /// Returns the offset applied to the position, or `None` if the agent
    /// stayed inside. Anything attached to the agent must be moved by the
    /// same offset.
    pub fn check_boundaries(&mut self, world: &World) -> Option<Vector2> {
        let before = self.position;
        self.position.x = wrap_axis(self.position.x, world.width, world.margin);
        self.position.y = wrap_axis(self.position.y, world.height, world.margin);

        let offset = self.position - before;
        if offset == Vector2::ZERO {
            None
        } else {
            log::debug!(
                "Agent wrapped from ({:.1}, {:.1}) to ({:.1}, {:.1})",
                before.x,
                before.y,
                self.position.x,
                self.position.y
            );
            Some(offset)
        }
    }
}

#[inline]
fn wrap_axis(value: f64, extent: f64, margin: f64) -> f64 {
    if value > extent + margin {
        -margin
    } else if value < -margin {
        extent + margin
    } else {
        value
    }
}
