use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Professional discipline of a supporter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Profession {
    Lawyer,
    Therapist,
    Counselor,
    NgoWorker,
    DigitalSafety,
}

impl Profession {
    /// Human-readable label, e.g. `ngo worker`.
    pub fn label(&self) -> String {
        self.as_ref().replace('_', " ")
    }
}

/// A vetted professional a survivor can connect with.
///
/// Static reference data; nothing in the stores mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supporter {
    pub id: String,
    pub name: String,
    pub profession: Profession,
    pub specializations: Vec<String>,
    pub verified: bool,
    pub rating: f32,
    pub reviews: u32,
    pub response_time: String,
    pub bio: String,
    pub avatar_url: String,
}
