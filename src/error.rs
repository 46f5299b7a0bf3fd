//! Error types and handling for the `CityPulse` engine

use thiserror::Error;

/// Main error type for the `CityPulse` engine
///
/// The taxonomy is deliberately narrow: the generators perform no I/O and no
/// network calls, so almost everything that can go wrong is either a bad
/// configuration or an invalid input to a sampling routine.
#[derive(Error, Debug)]
pub enum CityPulseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors (config file loading)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl CityPulseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CityPulseError::Config { .. } => {
                "Configuration error. Please check your reference configuration file.".to_string()
            }
            CityPulseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CityPulseError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            CityPulseError::General { message } => message.clone(),
        }
    }
}
