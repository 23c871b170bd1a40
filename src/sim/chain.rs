//! Chain-following inverse kinematics for tails and spines
//!
//! Joint 0 is driven by an anchor on the body. Joint 1 is thrown directly
//! behind the anchor's heading, and every later joint chases its predecessor
//! at a fixed segment length along a direction taken from further up the
//! chain.

use serde::{Deserialize, Serialize};

use crate::consts::DEGENERATE_LENGTH;
use crate::{Vector2, polar_to_cartesian};

/// Which joint sets the pull direction for joint `i` (i ≥ 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowMode {
    /// Direction from joint `i-2` to joint `i`: a lagging whip
    ///
    /// Re-resolving at the same anchor is a no-op only for a straight chain.
    #[default]
    Lookback,
    /// Direction from joint `i-1` to joint `i`: follow-the-leader
    Predecessor,
}

impl FollowMode {
    /// How many joints back the lead joint sits
    fn lookback(self) -> usize {
        match self {
            FollowMode::Lookback => 2,
            FollowMode::Predecessor => 1,
        }
    }
}

/// A single joint of a chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub position: Vector2,
}

/// Fixed-length chain of joints with a constant segment length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointChain {
    joints: Vec<Joint>,
    segment_length: f64,
    follow: FollowMode,
}

impl JointChain {
    /// Lay `count` joints from `origin` along `axis`, `segment_length` apart
    pub fn seeded(
        origin: Vector2,
        axis: Vector2,
        count: usize,
        segment_length: f64,
        follow: FollowMode,
    ) -> Self {
        let step = axis.normalize_or_zero() * segment_length;
        let joints = (0..count)
            .map(|i| Joint {
                position: origin + step * i as f64,
            })
            .collect();

        Self {
            joints,
            segment_length,
            follow,
        }
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    pub fn follow(&self) -> FollowMode {
        self.follow
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.joints.iter().map(|j| j.position)
    }

    /// The driven joint
    pub fn anchor(&self) -> Option<Vector2> {
        self.joints.first().map(|j| j.position)
    }

    /// The free end of the chain
    pub fn tip(&self) -> Option<Vector2> {
        self.joints.last().map(|j| j.position)
    }

    /// Distance between each adjacent pair of joints
    pub fn segment_lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.joints
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
    }

    /// Joint `back` places before `index`, if it exists
    fn neighbor(&self, index: usize, back: usize) -> Option<Vector2> {
        index
            .checked_sub(back)
            .and_then(|i| self.joints.get(i))
            .map(|j| j.position)
    }

    /// Re-solve the chain for a new anchor position and heading
    pub fn resolve(&mut self, anchor: Vector2, orientation: f64) {
        let Some(first) = self.joints.first_mut() else {
            return;
        };
        first.position = anchor;

        if let Some(second) = self.joints.get_mut(1) {
            let behind = polar_to_cartesian(1.0, orientation + std::f64::consts::PI);
            second.position = anchor + behind * self.segment_length;
        }

        let back = self.follow.lookback();
        for i in 2..self.joints.len() {
            let (Some(lead), Some(prev)) = (self.neighbor(i, back), self.neighbor(i, 1)) else {
                continue;
            };
            let current = self.joints[i].position;

            let pull = current - lead;
            let len = pull.length();
            if len <= DEGENERATE_LENGTH {
                log::trace!("Joint {} coincides with its lead, skipping", i);
                continue;
            }
            self.joints[i].position = prev + pull / len * self.segment_length;
        }
    }

    /// Move every joint rigidly by `offset`
    pub fn translate(&mut self, offset: Vector2) {
        for joint in &mut self.joints {
            joint.position += offset;
        }
    }
}
