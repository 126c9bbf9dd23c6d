//! Connection domain model.
//!
//! A connection pairs one survivor with one supporter and carries the
//! message thread between them.

use crate::error::{HavenError, Result};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Lifecycle status of a connection.
///
/// ```text
/// pending ──accept──▶ active ──close──▶ closed
///    └──────decline──────────────────────▲
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Active,
    Closed,
}

impl ConnectionStatus {
    pub fn can_transition_to(self, next: ConnectionStatus) -> bool {
        use ConnectionStatus::*;
        matches!((self, next), (Pending, Active) | (Pending, Closed) | (Active, Closed))
    }

    /// Validates a status change, returning the new status.
    pub fn transition(self, next: ConnectionStatus) -> Result<ConnectionStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(HavenError::IllegalTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

/// A single message in a connection thread. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub content: String,
    /// Timestamp when the message was sent (ISO 8601 format).
    pub timestamp: String,
}

/// A survivor–supporter pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub survivor_id: String,
    pub supporter_id: String,
    pub status: ConnectionStatus,
    /// The only survivor identity the supporter sees.
    pub survivor_alias: String,
    pub messages: Vec<Message>,
    /// Timestamp of the latest message (ISO 8601 format).
    pub last_updated: String,
}

impl Connection {
    /// Whether `user_id` is either party of this connection.
    pub fn involves(&self, user_id: &str) -> bool {
        self.survivor_id == user_id || self.supporter_id == user_id
    }

    /// Appends a message and bumps `last_updated` to its timestamp.
    pub fn push_message(&mut self, message: Message) {
        self.last_updated = message.timestamp.clone();
        self.messages.push(message);
    }
}
