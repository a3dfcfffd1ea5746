use models::stats::{by_username, PlayerStat};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::AuthGate;
use crate::errors::ServiceError;
use crate::storage::{is_valid_segment, DocumentStore};

use super::decode;

const COLLECTION: &str = "stats";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsListing {
    pub players: Vec<PlayerStat>,
    pub total_players: usize,
}

/// Per-player statistics pushed by the game server, one document per uuid.
#[derive(Clone)]
pub struct StatsService {
    store: DocumentStore,
    gate: AuthGate,
}

impl StatsService {
    pub fn new(store: DocumentStore, gate: AuthGate) -> Self {
        Self { store, gate }
    }

    pub async fn list(&self) -> StatsListing {
        let mut players: Vec<PlayerStat> = self.store.load_all(COLLECTION).await;
        players.sort_by(by_username);
        StatsListing { total_players: players.len(), players }
    }

    /// Upserts every entry by uuid. The whole batch is validated before
    /// anything is written.
    pub async fn upsert(&self, authorization: Option<&str>, body: Option<Value>) -> Result<usize, ServiceError> {
        self.gate.authorize_bot(authorization)?;
        let players: Vec<PlayerStat> = match body {
            Some(v @ Value::Array(_)) => decode(v)?,
            _ => return Err(ServiceError::validation("Stats data must be an array")),
        };
        if let Some(bad) = players.iter().find(|p| !is_valid_segment(&p.uuid)) {
            return Err(ServiceError::validation(format!("Invalid player uuid: {}", bad.uuid)));
        }
        for player in &players {
            self.store.save(COLLECTION, player).await?;
        }
        info!(collection = COLLECTION, count = players.len(), "player stats upserted");
        Ok(players.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{services, BOT_HEADER};
    use serde_json::json;

    #[tokio::test]
    async fn upsert_merges_by_uuid_and_lists_by_username() -> anyhow::Result<()> {
        let (svc, _) = services();
        svc.stats
            .upsert(Some(BOT_HEADER), Some(json!([
                {"uuid": "u-1", "username": "zed", "stats": {"kills": 1}},
                {"uuid": "u-2", "username": "Amy", "stats": {"kills": 2}, "rank": "vip"}
            ])))
            .await?;
        svc.stats
            .upsert(Some(BOT_HEADER), Some(json!([{"uuid": "u-1", "username": "zed", "stats": {"kills": 5}}])))
            .await?;

        let listing = svc.stats.list().await;
        assert_eq!(listing.total_players, 2);
        assert_eq!(listing.players[0].username, "Amy");
        assert_eq!(listing.players[0].extra.get("rank"), Some(&json!("vip")));
        assert_eq!(listing.players[1].stats, json!({"kills": 5}));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_batches_write_nothing() {
        let (svc, _) = services();
        let missing_uuid = json!([{"uuid": "ok", "username": "a"}, {"username": "b"}]);
        assert!(matches!(svc.stats.upsert(Some(BOT_HEADER), Some(missing_uuid)).await, Err(ServiceError::Validation(_))));
        let escaping = json!([{"uuid": "ok", "username": "a"}, {"uuid": "../x", "username": "b"}]);
        assert!(matches!(svc.stats.upsert(Some(BOT_HEADER), Some(escaping)).await, Err(ServiceError::Validation(_))));
        let hidden = json!([{"uuid": ".hidden", "username": "c"}]);
        assert!(matches!(svc.stats.upsert(Some(BOT_HEADER), Some(hidden)).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.stats.upsert(Some(BOT_HEADER), Some(json!({}))).await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.stats.list().await.total_players, 0);
    }
}
