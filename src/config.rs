// Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Tuning knobs shared by one playback session.
///
/// Capacities are ring-buffer sizes. The event channel must absorb the
/// worst-case burst a sequencer tick can deliver between two pumps; the
/// notification channel only carries warnings and errors, so it can stay
/// small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub event_channel_capacity: usize,
    pub notification_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 4096,
            notification_channel_capacity: 256,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_channel_capacity must be non-zero".to_string(),
            ));
        }
        if self.notification_channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "notification_channel_capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a RON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = ron::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a RON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
