//! Encounter configuration
//!
//! Defaults are tuned for a readable demo skirmish; every value can be
//! overridden from a TOML file passed on the command line.

use std::path::Path;

use serde::Deserialize;

use crate::combat::constants::MAX_CANNON_ACTIONS;
use crate::core::error::Result;

/// Configuration for one combat encounter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Seed for the encounter RNG
    ///
    /// The same seed with the same roster reproduces the encounter exactly.
    pub seed: u64,

    /// Number of randomly generated units in the roster
    pub units: usize,

    /// Cap on individual cannon-phase actions before the encounter is
    /// abandoned as a stalemate
    pub max_cannon_actions: usize,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            units: 4,
            max_cannon_actions: MAX_CANNON_ACTIONS,
        }
    }
}

impl EncounterConfig {
    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
