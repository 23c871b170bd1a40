//! Steering behaviors: seek with arrival, and wander
//!
//! Both produce a steering force clamped to the agent's `max_force` and add
//! it into the agent's acceleration. Several behaviors may accumulate before
//! one `Agent::update`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use crate::Vector2;
use crate::consts::*;

/// Arrival slowdown parameters for `seek`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arrival {
    /// Below this distance the desired speed ramps down
    pub radius: f64,
    /// Distance at which the ramp gives full speed (`speed = max * d / slowdown`)
    pub slowdown_radius: f64,
}

impl Default for Arrival {
    fn default() -> Self {
        Self {
            radius: ARRIVAL_RADIUS,
            slowdown_radius: SLOWDOWN_RADIUS,
        }
    }
}

impl Arrival {
    /// Desired speed at a given distance from the target
    pub fn desired_speed(&self, distance: f64, max_speed: f64) -> f64 {
        if distance < self.radius {
            (max_speed * (distance / self.slowdown_radius)).min(max_speed)
        } else {
            max_speed
        }
    }
}

/// Steer toward `target`, slowing inside the arrival radius
///
/// Returns the steering force that was added to the acceleration.
pub fn seek(agent: &mut Agent, target: Vector2, arrival: &Arrival) -> Vector2 {
    let offset = target - agent.position;
    let distance = offset.length();

    let desired = offset.normalize_or_zero() * arrival.desired_speed(distance, agent.max_speed);
    let steer = (desired - agent.velocity).clamp_length_max(agent.max_force);

    agent.apply_force(steer);
    steer
}

/// Wander circle parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderSettings {
    /// Radius of the circle the target rides on
    pub radius: f64,
    /// How far ahead of the agent the circle sits
    pub distance: f64,
    /// Max change to the wander angle per call (radians)
    pub change: f64,
}

impl Default for WanderSettings {
    fn default() -> Self {
        Self {
            radius: WANDER_RADIUS,
            distance: WANDER_DISTANCE,
            change: WANDER_CHANGE,
        }
    }
}

/// Wander state: the angle of the target on the wander circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wander {
    pub theta: f64,
    pub settings: WanderSettings,
}

impl Wander {
    pub fn new(settings: WanderSettings) -> Self {
        Self {
            theta: 0.0,
            settings,
        }
    }

    /// Nudge the wander angle and seek the resulting point on the circle
    pub fn steer<R: Rng>(
        &mut self,
        agent: &mut Agent,
        arrival: &Arrival,
        rng: &mut R,
    ) -> Vector2 {
        let change = self.settings.change;
        if change > 0.0 {
            self.theta += rng.random_range(-change..=change);
        }

        let target = self.target(agent);
        seek(agent, target, arrival)
    }

    /// Current wander target for the agent (no RNG step)
    pub fn target(&self, agent: &Agent) -> Vector2 {
        let center = agent.position + agent.velocity.normalize_or_zero() * self.settings.distance;
        center + crate::polar_to_cartesian(self.settings.radius, self.theta)
    }
}
