use models::event::{upcoming, Event};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::AuthGate;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

use super::decode;

const COLLECTION: &str = "events";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsListing {
    pub events: Vec<Event>,
    pub total_events: usize,
    pub upcoming_events: usize,
}

/// Discord events, replaced wholesale by the bot.
#[derive(Clone)]
pub struct EventService {
    store: DocumentStore,
    gate: AuthGate,
}

impl EventService {
    pub fn new(store: DocumentStore, gate: AuthGate) -> Self {
        Self { store, gate }
    }

    /// Scheduled and active events, earliest first, plus the stored total.
    pub async fn list(&self) -> EventsListing {
        let all: Vec<Event> = self.store.load_collection(COLLECTION).await;
        let events = upcoming(&all);
        EventsListing { total_events: all.len(), upcoming_events: events.len(), events }
    }

    pub async fn replace(&self, authorization: Option<&str>, body: Option<Value>) -> Result<usize, ServiceError> {
        self.gate.authorize_bot(authorization)?;
        let events: Vec<Event> = match body {
            Some(v @ Value::Array(_)) => decode(v)?,
            _ => return Err(ServiceError::validation("Events data must be an array")),
        };
        self.store.replace_collection(COLLECTION, &events).await?;
        info!(collection = COLLECTION, count = events.len(), "events replaced");
        Ok(events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{services, BOT_HEADER};
    use serde_json::json;

    #[tokio::test]
    async fn list_shows_only_upcoming_sorted_by_start() -> anyhow::Result<()> {
        let (svc, _) = services();
        let body = json!([
            {"id": "3", "name": "late", "status": "active", "start_time": "2026-07-03T00:00:00Z"},
            {"id": "2", "name": "done", "status": "completed", "start_time": "2026-07-01T00:00:00Z"},
            {"id": 1234567890123456789u64, "name": "early", "status": "scheduled", "start_time": "2026-07-02T00:00:00Z", "image": "x.png"},
            {"id": "4", "name": "odd", "status": "postponed", "start_time": "2026-07-01T00:00:00Z"}
        ]);
        assert_eq!(svc.events.replace(Some(BOT_HEADER), Some(body)).await?, 4);

        let listing = svc.events.list().await;
        assert_eq!(listing.total_events, 4);
        assert_eq!(listing.upcoming_events, 2);
        assert_eq!(listing.events[0].id.as_str(), "1234567890123456789");
        assert_eq!(listing.events[0].extra.get("image"), Some(&json!("x.png")));
        assert_eq!(listing.events[1].name.as_deref(), Some("late"));
        Ok(())
    }

    #[tokio::test]
    async fn replace_rejects_non_arrays_and_bad_auth() {
        let (svc, _) = services();
        assert!(matches!(svc.events.replace(Some(BOT_HEADER), Some(json!({"a": 1}))).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.events.replace(Some(BOT_HEADER), None).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.events.replace(Some("Bearer nope"), Some(json!([]))).await, Err(ServiceError::Unauthorized(_))));
        let float_id = json!([{"id": 1.5, "name": "n", "status": "active", "start_time": "2026-07-01T00:00:00Z"}]);
        assert!(matches!(svc.events.replace(Some(BOT_HEADER), Some(float_id)).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn empty_array_clears_events() -> anyhow::Result<()> {
        let (svc, _) = services();
        let one = json!([{"id": "1", "name": "n", "status": "active", "start_time": "2026-07-01T00:00:00Z"}]);
        svc.events.replace(Some(BOT_HEADER), Some(one)).await?;
        svc.events.replace(Some(BOT_HEADER), Some(json!([]))).await?;
        assert_eq!(svc.events.list().await.total_events, 0);
        Ok(())
    }
}
