//! Per-frame scene update
//!
//! Fixed order each frame: input → steer or wander → integrate → boundary
//! wrap → resolve appendages → feeding.

use serde::{Deserialize, Serialize};

use super::state::{Scene, TargetState};
use super::steering::seek;
use crate::Vector2;

/// Input gathered by the host since the previous frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// A new target point (click/tap), replacing any current one
    pub select: Option<Vector2>,
    /// The input layer withdrew the current target
    pub clear: bool,
}

/// Something that happened during a frame, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    TargetSelected(Vector2),
    TargetCleared,
    /// The agent wrapped around the world edge by this offset
    Wrapped { offset: Vector2 },
    /// The mouth reached the food at this point and ate it
    Fed { at: Vector2 },
}

/// Advance the scene by one frame
pub fn tick(scene: &mut Scene, input: &FrameInput) -> Vec<SceneEvent> {
    let mut events = Vec::new();

    if input.clear && scene.target != TargetState::Wandering {
        scene.clear_target();
        events.push(SceneEvent::TargetCleared);
    }
    if let Some(point) = input.select {
        scene.select_target(point);
        events.push(SceneEvent::TargetSelected(point));
    }

    // Steer
    let arrival = scene.settings.steering.arrival;
    match scene.target {
        TargetState::Tracking(point) => {
            seek(&mut scene.agent, point, &arrival);
        }
        TargetState::Wandering => {
            scene
                .wander
                .steer(&mut scene.agent, &arrival, &mut scene.rng);
        }
    }

    // Integrate
    let turn = scene.agent.update();
    log::trace!(
        "Frame {}: pos ({:.2}, {:.2}) speed {:.3} turn {:.4}",
        scene.frame,
        scene.agent.position.x,
        scene.agent.position.y,
        scene.agent.velocity.length(),
        turn
    );

    // Wrap, dragging the appendages along so nothing stretches across the seam
    let world = scene.settings.world;
    if let Some(offset) = scene.agent.check_boundaries(&world) {
        for appendage in &mut scene.appendages {
            appendage.chain.translate(offset);
        }
        events.push(SceneEvent::Wrapped { offset });
    }

    // Resolve appendages
    let orientation = scene.agent.orientation;
    let anchors: Vec<Vector2> = scene
        .appendages
        .iter()
        .map(|a| scene.anchor_position(a.anchor))
        .collect();
    for (appendage, anchor) in scene.appendages.iter_mut().zip(anchors) {
        appendage.chain.resolve(anchor, orientation);
    }

    // Feed
    if scene.settings.feeding.consume_on_contact {
        if let Some(food) = scene.food() {
            if food.contains(scene.mouth()) {
                log::info!(
                    "Fed at ({:.1}, {:.1}) on frame {}",
                    food.position.x,
                    food.position.y,
                    scene.frame
                );
                scene.clear_target();
                events.push(SceneEvent::Fed { at: food.position });
            }
        }
    }

    scene.frame += 1;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Preset, Settings};
    use approx::assert_abs_diff_eq;

    fn run(scene: &mut Scene, frames: usize) -> Vec<SceneEvent> {
        let idle = FrameInput::default();
        (0..frames).flat_map(|_| tick(scene, &idle)).collect()
    }

    #[test]
    fn test_tick_tracks_selected_target() {
        let mut scene = Scene::new(Settings::default());
        let input = FrameInput {
            select: Some(Vector2::new(700.0, 300.0)),
            clear: false,
        };
        let events = tick(&mut scene, &input);

        assert_eq!(events, vec![SceneEvent::TargetSelected(Vector2::new(700.0, 300.0))]);
        assert!(scene.agent.position.x > 400.0);
        assert_eq!(scene.agent.acceleration, Vector2::ZERO);
        assert_eq!(scene.frame, 1);
    }

    #[test]
    fn test_tick_clear_returns_to_wandering() {
        let mut scene = Scene::new(Settings::default());
        scene.select_target(Vector2::new(100.0, 100.0));
        let events = tick(
            &mut scene,
            &FrameInput {
                select: None,
                clear: true,
            },
        );
        assert_eq!(events, vec![SceneEvent::TargetCleared]);
        assert_eq!(scene.target, TargetState::Wandering);
    }

    #[test]
    fn test_fish_eats_food() {
        let mut scene = Scene::new(Settings::default());
        scene.select_target(Vector2::new(650.0, 300.0));

        let events = run(&mut scene, 600);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, SceneEvent::Fed { at } if *at == Vector2::new(650.0, 300.0))),
            "fish never reached the food"
        );
        assert_eq!(scene.target, TargetState::Wandering);
    }

    #[test]
    fn test_food_kept_when_consumption_disabled() {
        let mut settings = Settings::default();
        settings.feeding.consume_on_contact = false;
        let mut scene = Scene::new(settings);
        scene.select_target(Vector2::new(650.0, 300.0));

        let events = run(&mut scene, 600);
        assert!(!events.iter().any(|e| matches!(e, SceneEvent::Fed { .. })));
        assert!(matches!(scene.target, TargetState::Tracking(_)));
    }

    /// Put the agent (and its appendages, rigidly) at `x`, swimming right
    fn place(scene: &mut Scene, x: f64) {
        let shift = Vector2::new(x, 300.0) - scene.agent.position;
        scene.agent.position += shift;
        scene.agent.velocity = Vector2::new(10.0, 0.0);
        for appendage in &mut scene.appendages {
            appendage.chain.translate(shift);
        }
    }

    #[test]
    fn test_wrap_drags_appendages() {
        let mut wrapped = Scene::new(Settings::default());
        let mut open_settings = Settings::default();
        open_settings.world.width = 10_000.0;
        let mut open = Scene::new(open_settings);
        place(&mut wrapped, 1099.0);
        place(&mut open, 1099.0);

        let events = tick(&mut wrapped, &FrameInput::default());
        assert!(events.iter().any(|e| matches!(e, SceneEvent::Wrapped { .. })));
        assert!(tick(&mut open, &FrameInput::default()).is_empty());
        assert_eq!(wrapped.agent.position.x, -300.0);

        // Relative to the agent the tails look exactly as if no wrap happened
        for (a, b) in wrapped.appendages.iter().zip(&open.appendages) {
            for (p, q) in a.chain.positions().zip(b.chain.positions()) {
                let p = p - wrapped.agent.position;
                let q = q - open.agent.position;
                assert_abs_diff_eq!(p.x, q.x, epsilon = 1e-6);
                assert_abs_diff_eq!(p.y, q.y, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_chain_lengths_hold_while_wandering() {
        let mut scene = Scene::new(Settings::default());
        run(&mut scene, 300);
        for appendage in &scene.appendages {
            for len in appendage.chain.segment_lengths() {
                assert_abs_diff_eq!(len, 20.0, epsilon = 1e-6);
            }
        }
        assert!(scene.agent.velocity.length() <= scene.agent.max_speed + 1e-9);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            FrameInput::default(),
            FrameInput {
                select: Some(Vector2::new(100.0, 50.0)),
                clear: false,
            },
            FrameInput::default(),
            FrameInput {
                select: None,
                clear: true,
            },
        ];

        let mut scene1 = Scene::new(Settings::from_preset(Preset::Eel));
        let mut scene2 = Scene::new(Settings::from_preset(Preset::Eel));
        for _ in 0..25 {
            for input in &inputs {
                tick(&mut scene1, input);
                tick(&mut scene2, input);
            }
        }

        assert_eq!(scene1.frame, scene2.frame);
        assert_eq!(scene1.agent.position, scene2.agent.position);
        assert_eq!(scene1.wander.theta, scene2.wander.theta);
        let tip1 = scene1.appendages[0].chain.tip();
        let tip2 = scene2.appendages[0].chain.tip();
        assert_eq!(tip1, tip2);
    }
}
