use models::mapping::{MappingsDocument, PlayerMapping};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::AuthGate;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

use super::decode;

const COLLECTION: &str = "player-mappings";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingsListing {
    pub mappings: Vec<PlayerMapping>,
    pub total_players: usize,
}

/// Discord id to Minecraft account links, replaced wholesale by the bot.
#[derive(Clone)]
pub struct MappingService {
    store: DocumentStore,
    gate: AuthGate,
}

impl MappingService {
    pub fn new(store: DocumentStore, gate: AuthGate) -> Self {
        Self { store, gate }
    }

    pub async fn list(&self) -> MappingsListing {
        let doc: MappingsDocument = self.store.load_collection(COLLECTION).await;
        let mappings: Vec<PlayerMapping> = doc.iter().map(|(id, m)| m.to_view(id)).collect();
        MappingsListing { total_players: mappings.len(), mappings }
    }

    pub async fn replace(&self, authorization: Option<&str>, body: Option<Value>) -> Result<usize, ServiceError> {
        self.gate.authorize_bot(authorization)?;
        let mappings: MappingsDocument = match body {
            Some(v @ Value::Object(_)) => decode(v)?,
            _ => return Err(ServiceError::validation("No mappings data provided")),
        };
        self.store.replace_collection(COLLECTION, &mappings).await?;
        info!(collection = COLLECTION, count = mappings.len(), "player mappings replaced");
        Ok(mappings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{services, BOT_HEADER};
    use serde_json::json;

    #[tokio::test]
    async fn list_fills_defaults() -> anyhow::Result<()> {
        let (svc, _) = services();
        let body = json!({
            "111111111111111111": {"java": "Steve", "discord_username": "steve#1"},
            "222222222222222222": {"java": "Alex", "bedrock": "AlexBE"}
        });
        assert_eq!(svc.mappings.replace(Some(BOT_HEADER), Some(body)).await?, 2);

        let listing = svc.mappings.list().await;
        assert_eq!(listing.total_players, 2);
        let first = &listing.mappings[0];
        assert_eq!(first.discord_id, "111111111111111111");
        assert_eq!(first.bedrock, None);
        assert_eq!(first.discord_username, "steve#1");
        assert_eq!(listing.mappings[1].discord_username, "User_222222222222222222");
        Ok(())
    }

    #[tokio::test]
    async fn replace_requires_bot_secret() {
        let (svc, _) = services();
        assert!(matches!(svc.mappings.replace(None, Some(json!({}))).await, Err(ServiceError::Unauthorized(_))));
        assert!(matches!(svc.mappings.replace(Some(BOT_HEADER), None).await, Err(ServiceError::Validation(_))));
    }
}
