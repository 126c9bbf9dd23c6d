//! Error types for the Haven application.

use thiserror::Error;

/// A shared error type for the entire Haven application.
///
/// Every store operation that can reject its input returns one of these
/// variants to the immediate caller. Capability failures never show up here:
/// they are converted into fail-open values at the service boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HavenError {
    /// Registration attempted with an email that already belongs to an account.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// No account matches the given email and secret.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The operation requires a signed-in user.
    #[error("No active session")]
    NoActiveSession,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A connection status change that the lifecycle does not allow.
    #[error("Illegal connection transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HavenError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a NotFound error for a connection id.
    pub fn connection_not_found(id: impl Into<String>) -> Self {
        Self::not_found("connection", id)
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The message shown to the user by the presentation layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid email or password.",
            Self::EmailTaken(_) => "Registration failed. Email might be in use.",
            Self::NoActiveSession => "Please sign in to continue.",
            _ => "An unexpected error occurred.",
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HavenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HavenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HavenError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HavenError>`.
pub type Result<T> = std::result::Result<T, HavenError>;
