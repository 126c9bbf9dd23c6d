//! Domain layer for Haven.
//!
//! Pure models, the shared error type, configuration models and the
//! generative-AI capability boundary. Nothing here performs I/O.

pub mod capability;
pub mod config;
pub mod connection;
pub mod dossier;
pub mod error;
pub mod evidence;
pub mod supporter;
pub mod user;

// Re-export common error type
pub use error::{HavenError, Result};

/// Current time as an ISO 8601 string.
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Generates a prefixed unique identifier, e.g. `ev_6f1c…`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
