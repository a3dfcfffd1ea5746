use models::team::{TeamView, TeamsDocument};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::AuthGate;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

use super::decode;

const COLLECTION: &str = "teams";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsListing {
    pub teams: Vec<TeamView>,
    pub total_teams: usize,
    pub total_members: usize,
}

/// Team rosters keyed by Discord role id, replaced wholesale by the bot.
#[derive(Clone)]
pub struct TeamService {
    store: DocumentStore,
    gate: AuthGate,
}

impl TeamService {
    pub fn new(store: DocumentStore, gate: AuthGate) -> Self {
        Self { store, gate }
    }

    pub async fn list(&self) -> TeamsListing {
        let doc: TeamsDocument = self.store.load_collection(COLLECTION).await;
        let teams: Vec<TeamView> = doc.iter().map(|(role_id, team)| team.to_view(role_id)).collect();
        let total_members = teams.iter().map(|t| t.member_count).sum();
        TeamsListing { total_teams: teams.len(), total_members, teams }
    }

    pub async fn replace(&self, authorization: Option<&str>, body: Option<Value>) -> Result<usize, ServiceError> {
        self.gate.authorize_bot(authorization)?;
        let teams: TeamsDocument = match body {
            Some(Value::Object(map)) if !map.is_empty() => decode(Value::Object(map))?,
            _ => return Err(ServiceError::validation("No teams data provided")),
        };
        self.store.replace_collection(COLLECTION, &teams).await?;
        info!(collection = COLLECTION, count = teams.len(), "teams replaced");
        Ok(teams.len())
    }
}
