//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors, raised before any upstream call
    #[error("Invalid input for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The external AI service failed or returned unusable content
    #[error("Generation failed: {message}")]
    Generation { message: String },

    /// The external AI call exceeded the configured deadline
    #[error("Generation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "The planning service is not configured. Please check the API credential."
                    .to_string()
            }
            PlannerError::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            PlannerError::Generation { .. } => {
                "Could not generate a travel plan. Please try again.".to_string()
            }
            PlannerError::Timeout { .. } => {
                "The travel plan took too long to generate. Please try again.".to_string()
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
