//! Error types for connector configuration

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value} for configuration {setting}: {reason}")]
    InvalidValue {
        setting: String,
        value: String,
        reason: String,
    },

    #[error("Invalid mapping setting name: {name} (expected topic.<topic>.mapping)")]
    InvalidSettingName { name: String },
}

impl ConfigError {
    pub fn invalid_value(
        setting: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            setting: setting.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
