//! Error types for pkConnector

use thiserror::Error;

/// Result type alias using pkConnector's Error
pub type Result<T> = std::result::Result<T, Error>;

/// pkConnector error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Storage errors (E100-E199)
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Input errors (E200-E299)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Workflow errors (E300-E399)
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "E100",
            Self::Serialization(_) => "E101",
            Self::InvalidInput(_) => "E200",
            Self::InvalidTransition { .. } => "E300",
            Self::ConfigError(_) => "E600",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Storage(_) => Some("pkconnector config get storage.data_dir".to_string()),
            Self::ConfigError(_) => Some("pkconnector config list".to_string()),
            Self::InvalidTransition { .. } => Some("Cancel the open form first".to_string()),
            _ => None,
        }
    }
}
