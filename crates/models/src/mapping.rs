use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::team::placeholder_username;

/// The mappings document: Discord user id -> linked game accounts.
pub type MappingsDocument = BTreeMap<String, MappingRecord>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    #[serde(default)]
    pub java: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_username: Option<String>,
}

/// Mapping as served to the game mod and the website.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMapping {
    pub discord_id: String,
    pub java: Option<String>,
    pub bedrock: Option<String>,
    pub discord_username: String,
}

impl MappingRecord {
    pub fn to_view(&self, discord_id: &str) -> PlayerMapping {
        PlayerMapping {
            discord_id: discord_id.to_string(),
            java: self.java.clone(),
            bedrock: self.bedrock.clone().filter(|b| !b.is_empty()),
            discord_username: self
                .discord_username
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| placeholder_username(discord_id)),
        }
    }
}
