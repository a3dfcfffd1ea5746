use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Snowflake;

/// The teams document: role id -> team, as pushed by the bot.
pub type TeamsDocument = BTreeMap<String, TeamRecord>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberDetail {
    pub id: Snowflake,
    pub username: String,
}

/// Stored team shape. The bot may send either `leader_id` or `leader`, and
/// either resolved `member_details` or bare `members` ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_name: Option<String>,
    #[serde(default)]
    pub members: Vec<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_details: Option<Vec<MemberDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub username: String,
}

/// Team as served to the website.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub role_id: String,
    pub name: String,
    pub leader: Option<String>,
    pub leader_name: String,
    pub members: Vec<TeamMember>,
    pub created_at: Option<serde_json::Value>,
    pub member_count: usize,
}

pub const UNNAMED_TEAM: &str = "Unnamed Team";

/// Display name for a user the bot could not resolve.
pub fn placeholder_username(id: &str) -> String {
    format!("User_{id}")
}

impl TeamRecord {
    pub fn to_view(&self, role_id: &str) -> TeamView {
        let leader = self.leader_id.as_ref().or(self.leader.as_ref()).map(|s| s.to_string());
        let leader_name = match (&self.leader_name, &leader) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(id)) => placeholder_username(id),
            (_, None) => placeholder_username("unknown"),
        };

        let members: Vec<TeamMember> = match &self.member_details {
            Some(details) => details
                .iter()
                .map(|m| TeamMember { id: m.id.to_string(), username: m.username.clone() })
                .collect(),
            None => self
                .members
                .iter()
                .map(|id| TeamMember { id: id.to_string(), username: placeholder_username(id.as_str()) })
                .collect(),
        };

        TeamView {
            role_id: role_id.to_string(),
            name: self.name.clone().filter(|n| !n.is_empty()).unwrap_or_else(|| UNNAMED_TEAM.to_string()),
            leader,
            leader_name,
            member_count: members.len(),
            members,
            created_at: self.created_at.clone(),
        }
    }
}
