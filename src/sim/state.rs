//! Scene state owned by the host
//!
//! Everything one frame tick reads or writes lives here: the agent, its
//! appendages, the current target and the seeded wander RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::body::Food;
use super::chain::JointChain;
use super::steering::Wander;
use crate::settings::Settings;
use crate::{Vector2, polar_to_cartesian};

/// What the agent steers toward this frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TargetState {
    /// A live target supplied by the input layer
    Tracking(Vector2),
    /// No target: roam using the wander circle
    #[default]
    Wandering,
}

impl TargetState {
    pub fn point(&self) -> Option<Vector2> {
        match self {
            TargetState::Tracking(point) => Some(*point),
            TargetState::Wandering => None,
        }
    }
}

/// A chain hanging from one outline point of the body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appendage {
    /// Outline point index the chain is driven from
    pub anchor: usize,
    pub chain: JointChain,
}

/// The whole simulated scene
#[derive(Debug, Clone)]
pub struct Scene {
    pub settings: Settings,
    pub agent: Agent,
    pub wander: Wander,
    pub appendages: Vec<Appendage>,
    pub target: TargetState,
    /// Frames simulated so far
    pub frame: u64,
    pub(super) rng: Pcg32,
}

impl Scene {
    /// Create a scene with the agent at rest in the middle of the world
    pub fn new(settings: Settings) -> Self {
        let agent = Agent::new(
            settings.world.center(),
            settings.steering.max_speed,
            settings.steering.max_force,
        );
        let trailing = polar_to_cartesian(1.0, agent.orientation + std::f64::consts::PI);

        let appendages = settings
            .chains
            .iter()
            .map(|cfg| {
                let origin = settings
                    .body
                    .anchor(cfg.anchor, agent.position, agent.orientation)
                    .unwrap_or(agent.position);
                Appendage {
                    anchor: cfg.anchor,
                    chain: JointChain::seeded(
                        origin,
                        trailing,
                        cfg.joints,
                        cfg.segment_length,
                        cfg.follow,
                    ),
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "Scene created: seed {}, {} appendage(s), world {}x{}",
            settings.seed,
            appendages.len(),
            settings.world.width,
            settings.world.height
        );

        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            wander: Wander::new(settings.wander),
            agent,
            appendages,
            target: TargetState::Wandering,
            frame: 0,
            settings,
        }
    }

    /// Replace the current target
    pub fn select_target(&mut self, point: Vector2) {
        log::debug!("Target selected at ({:.1}, {:.1})", point.x, point.y);
        self.target = TargetState::Tracking(point);
    }

    /// Drop the current target and go back to wandering
    pub fn clear_target(&mut self) {
        if self.target != TargetState::Wandering {
            log::debug!("Target cleared");
        }
        self.target = TargetState::Wandering;
    }

    /// Food particle at the tracked target, if any
    pub fn food(&self) -> Option<Food> {
        self.target
            .point()
            .map(|p| Food::new(p, self.settings.feeding.food_radius))
    }

    /// Mouth point in world space
    pub fn mouth(&self) -> Vector2 {
        self.settings
            .body
            .mouth(self.agent.position, self.agent.orientation)
            .unwrap_or(self.agent.position)
    }

    /// World-space position of outline point `index`, falling back to the agent
    pub fn anchor_position(&self, index: usize) -> Vector2 {
        self.settings
            .body
            .anchor(index, self.agent.position, self.agent.orientation)
            .unwrap_or(self.agent.position)
    }
}
