//! Read-only geometry handed to an external renderer
//!
//! The core never draws. Each frame the host captures a `SceneGeometry` and
//! draws it however it likes.

pub mod shapes;

use serde::Serialize;

use crate::Vector2;
use crate::sim::{FollowMode, Food, Scene};

/// Curve samples per chain segment in the smoothed polyline
pub const SMOOTHING_SAMPLES: usize = 4;
/// Segments used to outline the food particle
pub const FOOD_SEGMENTS: u32 = 16;

/// One appendage as drawable points
#[derive(Debug, Clone, Serialize)]
pub struct ChainGeometry {
    /// Outline point the chain hangs from
    pub anchor: usize,
    pub joints: Vec<Vector2>,
    pub tip: Option<Vector2>,
    /// Sum of segment lengths along the joints
    pub length: f64,
    pub follow: FollowMode,
    /// Catmull-Rom curve through the joints
    pub smoothed: Vec<Vector2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodGeometry {
    pub food: Food,
    pub outline: Vec<Vector2>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct SceneGeometry {
    pub frame: u64,
    pub position: Vector2,
    pub velocity: Vector2,
    pub orientation_degrees: f64,
    /// Body outline in world space, mouth first
    pub outline: Vec<Vector2>,
    pub chains: Vec<ChainGeometry>,
    pub food: Option<FoodGeometry>,
}

impl SceneGeometry {
    pub fn capture(scene: &Scene) -> Self {
        let agent = &scene.agent;

        let chains = scene
            .appendages
            .iter()
            .map(|appendage| {
                let joints: Vec<Vector2> = appendage.chain.positions().collect();
                ChainGeometry {
                    anchor: appendage.anchor,
                    tip: appendage.chain.tip(),
                    length: shapes::polyline_length(&joints),
                    follow: appendage.chain.follow(),
                    smoothed: shapes::smooth(&joints, SMOOTHING_SAMPLES),
                    joints,
                }
            })
            .collect();

        let food = scene.food().map(|food| FoodGeometry {
            outline: shapes::circle(food.position, food.radius, FOOD_SEGMENTS),
            food,
        });

        Self {
            frame: scene.frame,
            position: agent.position,
            velocity: agent.velocity,
            orientation_degrees: agent.orientation_degrees(),
            outline: scene.settings.body.outline(agent.position, agent.orientation),
            chains,
            food,
        }
    }
}

impl Scene {
    /// Snapshot of the current frame for rendering
    pub fn geometry(&self) -> SceneGeometry {
        SceneGeometry::capture(self)
    }
}
