//! Rule-variant configuration.
//!
//! Loaded from JSON. Every field has a default, so `{}` yields the canonical
//! rule set and a file only needs to name what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Switches for the rule points where revisions of the game disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// A heal or kill consumes the special slot as well as the standard one.
    pub special_action_uses_both_slots: bool,
    /// A healed piece is also immune until its owner's next turn.
    pub heal_grants_immunity: bool,
    /// Hold the player switch until the presenter calls `Engine::finish_turn`.
    pub defer_turn_switch: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            special_action_uses_both_slots: false,
            heal_grants_immunity: true,
            defer_turn_switch: false,
        }
    }
}

impl RulesConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }
}
