//! Simulation settings and revision presets
//!
//! Loaded from JSON on disk; any field left out falls back to the fish preset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Arrival, Body, FollowMode, WanderSettings, World};

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("body outline needs at least a mouth point")]
    EmptyOutline,
    #[error("chain {chain} needs at least 2 joints, got {joints}")]
    TooFewJoints { chain: usize, joints: usize },
    #[error("chain {chain} anchor {anchor} is past the end of a {outline_len}-point outline")]
    AnchorOutOfRange {
        chain: usize,
        anchor: usize,
        outline_len: usize,
    },
}

/// Revisions of the sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// V-shaped fish trailing two tails
    #[default]
    Fish,
    /// Slow single-spine mover
    Eel,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Fish => "fish",
            Preset::Eel => "eel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fish" => Some(Preset::Fish),
            "eel" | "spine" => Some(Preset::Eel),
            _ => None,
        }
    }
}

/// Speed and force limits plus arrival behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringSettings {
    pub max_speed: f64,
    pub max_force: f64,
    pub arrival: Arrival,
}

impl Default for SteeringSettings {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            max_force: MAX_FORCE,
            arrival: Arrival::default(),
        }
    }
}

/// One appendage attached to the body outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    /// Outline point the chain hangs from
    pub anchor: usize,
    pub joints: usize,
    pub segment_length: f64,
    pub follow: FollowMode,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            anchor: 1,
            joints: TAIL_JOINTS,
            segment_length: TAIL_SEGMENT_LENGTH,
            follow: FollowMode::Lookback,
        }
    }
}

/// Food consumption behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedingSettings {
    pub food_radius: f64,
    /// Drop the target once the mouth touches the food
    pub consume_on_contact: bool,
}

impl Default for FeedingSettings {
    fn default() -> Self {
        Self {
            food_radius: FOOD_RADIUS,
            consume_on_contact: true,
        }
    }
}

/// All simulation tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for wander
    pub seed: u64,
    pub world: World,
    pub steering: SteeringSettings,
    pub wander: WanderSettings,
    pub body: Body,
    pub chains: Vec<ChainSettings>,
    pub feeding: FeedingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Preset::Fish)
    }
}

impl Settings {
    /// Create settings from a revision preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fish => Self {
                seed: 0,
                world: World::default(),
                steering: SteeringSettings::default(),
                wander: WanderSettings::default(),
                body: Body::default(),
                chains: (1..=2)
                    .map(|anchor| ChainSettings {
                        anchor,
                        ..ChainSettings::default()
                    })
                    .collect(),
                feeding: FeedingSettings::default(),
            },
            Preset::Eel => Self {
                seed: 0,
                world: World::new(WORLD_WIDTH, WORLD_HEIGHT, 50.0),
                steering: SteeringSettings {
                    max_speed: 3.0,
                    max_force: 0.1,
                    arrival: Arrival::default(),
                },
                wander: WanderSettings::default(),
                body: Body::point(),
                chains: vec![ChainSettings {
                    anchor: 0,
                    joints: 20,
                    segment_length: 5.0,
                    follow: FollowMode::Lookback,
                }],
                feeding: FeedingSettings::default(),
            },
        }
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Check every tunable is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        non_negative("world.margin", self.world.margin)?;

        positive("steering.max_speed", self.steering.max_speed)?;
        positive("steering.max_force", self.steering.max_force)?;
        non_negative("steering.arrival.radius", self.steering.arrival.radius)?;
        positive(
            "steering.arrival.slowdown_radius",
            self.steering.arrival.slowdown_radius,
        )?;

        non_negative("wander.radius", self.wander.radius)?;
        non_negative("wander.distance", self.wander.distance)?;
        non_negative("wander.change", self.wander.change)?;

        non_negative("feeding.food_radius", self.feeding.food_radius)?;

        let outline_len = self.body.outline.len();
        if outline_len == 0 {
            return Err(SettingsError::EmptyOutline);
        }

        for (chain, cfg) in self.chains.iter().enumerate() {
            if cfg.joints < 2 {
                return Err(SettingsError::TooFewJoints {
                    chain,
                    joints: cfg.joints,
                });
            }
            if cfg.anchor >= outline_len {
                return Err(SettingsError::AnchorOutOfRange {
                    chain,
                    anchor: cfg.anchor,
                    outline_len,
                });
            }
            positive("chains.segment_length", cfg.segment_length)?;
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Negative { field, value })
    }
}
