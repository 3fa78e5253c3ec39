//! Configuration System
//!
//! Loads driver tuning parameters from tuning.toml so pacing can be
//! adjusted without recompiling. Core scoring formulas are fixed
//! constants in intrigue-core and are deliberately not configurable.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub growth: GrowthConfig,
    pub events: EventConfig,
}

/// Simulation pacing parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub default_turns: u32,
    /// A status table is printed every this many turns
    pub report_interval: u32,
}

/// Natural growth applied to every agent each turn
#[derive(Debug, Clone, Deserialize)]
pub struct GrowthConfig {
    pub power_per_turn: f32,
    pub loyalty_per_turn: f32,
}

/// Random event parameters
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    /// A windfall strikes when a 1-100 roll lands under this
    pub windfall_chance: u32,
    /// Power granted to the struck agent
    pub windfall_power: f32,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the given path, or fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            eprintln!(
                "Warning: could not load {}: {}. Using defaults.",
                path.display(),
                e
            );
            Self::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                default_turns: 15,
                report_interval: 5,
            },
            growth: GrowthConfig {
                power_per_turn: 0.5,
                loyalty_per_turn: 0.02,
            },
            events: EventConfig {
                windfall_chance: 30,
                windfall_power: 2.0,
            },
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
