//! Account and session domain models.

use crate::supporter::Profession;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Role an account plays in the application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Survivor,
    Supporter,
    Admin,
}

/// Role-specific fields collected at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDetails {
    /// Pseudonym shown to supporters (survivors).
    #[serde(default)]
    pub alias: Option<String>,
    /// Professional discipline (supporters).
    #[serde(default)]
    pub profession: Option<Profession>,
}

/// A registered account, including its credential.
///
/// The secret is held and compared in plaintext; accounts live only in
/// process memory and are never exposed through a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub secret: String,
    pub role: Role,
    pub alias: Option<String>,
    pub profession: Option<Profession>,
}

impl Account {
    /// Case-insensitive email comparison.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    /// The session view of this account, with the secret stripped.
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            alias: self.alias.clone(),
            profession: self.profession,
        }
    }
}

/// The currently authenticated account, without its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<Profession>,
}

impl SessionUser {
    /// Name shown to other parties: the alias when set, the name otherwise.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
