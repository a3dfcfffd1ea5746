use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Per-player statistics reported by the game server mod, keyed by player uuid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub uuid: String,
    #[serde(default)]
    pub username: String,
    /// Opaque stats blob; the portal only stores and forwards it.
    #[serde(default)]
    pub stats: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Alphabetical by username, ignoring case; exact comparison breaks ties.
pub fn by_username(a: &PlayerStat, b: &PlayerStat) -> Ordering {
    a.username
        .to_lowercase()
        .cmp(&b.username.to_lowercase())
        .then_with(|| a.username.cmp(&b.username))
        .then_with(|| a.uuid.cmp(&b.uuid))
}
