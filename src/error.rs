//! Error types and handling for the `TripWeaver` service

use thiserror::Error;

/// Main error type for the trip planning pipeline
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Generative response could not be parsed or repaired into the expected shape
    #[error("Parse failure: {message}")]
    Parse { message: String },

    /// A collaborator is unreachable or not configured
    #[error("Collaborator unavailable: {message}")]
    Unavailable { message: String },

    /// A collaborator call exceeded its deadline
    #[error("Collaborator timeout: {message}")]
    Timeout { message: String },

    /// A collaborator answered with something outside its contract
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// No destination could be resolved from the request text
    #[error("Could not resolve a destination from the request")]
    DestinationUnresolved,

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl PlannerError {
    /// Create a new parse-failure error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new collaborator-unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new collaborator-timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Whether the pipeline recovers from this error by switching to its
    /// deterministic fallback instead of surfacing it to the caller.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PlannerError::Parse { .. }
                | PlannerError::Unavailable { .. }
                | PlannerError::Timeout { .. }
                | PlannerError::InvalidResponse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Parse { .. } | PlannerError::InvalidResponse { .. } => {
                "The planning assistant returned an unusable answer. Please try again.".to_string()
            }
            PlannerError::Unavailable { .. } | PlannerError::Timeout { .. } => {
                "Unable to reach external travel services. Please check your internet connection."
                    .to_string()
            }
            PlannerError::DestinationUnresolved => {
                "I couldn't identify a specific destination from your request. Please specify a city or country you'd like to visit."
                    .to_string()
            }
            PlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            PlannerError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            Self::Unavailable {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest_middleware::Error> for PlannerError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => Self::from(e),
            reqwest_middleware::Error::Middleware(e) => Self::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let parse_err = PlannerError::parse("unbalanced braces");
        assert!(matches!(parse_err, PlannerError::Parse { .. }));

        let unavailable_err = PlannerError::unavailable("connection refused");
        assert!(matches!(unavailable_err, PlannerError::Unavailable { .. }));

        let validation_err = PlannerError::validation("empty message");
        assert!(matches!(validation_err, PlannerError::Validation { .. }));
    }

    #[test]
    fn test_recoverable_errors_fall_back() {
        assert!(PlannerError::parse("x").is_recoverable());
        assert!(PlannerError::unavailable("x").is_recoverable());
        assert!(PlannerError::timeout("x").is_recoverable());
        assert!(PlannerError::invalid_response("x").is_recoverable());

        assert!(!PlannerError::DestinationUnresolved.is_recoverable());
        assert!(!PlannerError::validation("x").is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let unavailable_err = PlannerError::unavailable("test");
        assert!(unavailable_err.user_message().contains("Unable to reach"));

        let destination_err = PlannerError::DestinationUnresolved;
        assert!(destination_err.user_message().contains("destination"));

        let validation_err = PlannerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let planner_err: PlannerError = io_err.into();
        assert!(matches!(planner_err, PlannerError::Io { .. }));
    }
}
