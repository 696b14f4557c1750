//! Game settings loaded from TOML.

use crate::games::ultimate::DrawPolicy;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a game session.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// How full boards without a line are treated.
    #[serde(default)]
    draw_policy: DrawPolicy,

    /// Whether the board render prints row and column numbers.
    #[serde(default = "default_show_coordinates")]
    show_coordinates: bool,
}

#[instrument]
fn default_show_coordinates() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            draw_policy: DrawPolicy::default(),
            show_coordinates: default_show_coordinates(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(draw_policy = %config.draw_policy, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads from `path` when given, otherwise uses defaults.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the draw policy.
    pub fn with_draw_policy(mut self, draw_policy: DrawPolicy) -> Self {
        self.draw_policy = draw_policy;
        self
    }

    /// Overrides whether coordinates are shown.
    pub fn with_show_coordinates(mut self, show_coordinates: bool) -> Self {
        self.show_coordinates = show_coordinates;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
