//! Deterministic simulation module
//!
//! All animation logic lives here. This module must stay pure and deterministic:
//! - One synchronous update per frame
//! - Seeded RNG only, injected into wander
//! - No rendering or platform dependencies

pub mod agent;
pub mod body;
pub mod chain;
pub mod state;
pub mod steering;
pub mod tick;

pub use agent::{Agent, World};
pub use body::{Body, Food};
pub use chain::{FollowMode, Joint, JointChain};
pub use state::{Appendage, Scene, TargetState};
pub use steering::{Arrival, Wander, WanderSettings, seek};
pub use tick::{FrameInput, SceneEvent, tick};
