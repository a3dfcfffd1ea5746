use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Snowflake;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    /// Shown on the website: not yet finished and not called off.
    pub fn is_upcoming(self) -> bool {
        matches!(self, EventStatus::Scheduled | EventStatus::Active)
    }
}

/// A Discord scheduled event as reported by the bot.
///
/// Only `id` and `status` are interpreted. Timestamps are kept exactly as
/// the bot sent them and parsed only to order the upcoming list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Snowflake,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: Value,
    #[serde(default)]
    pub end_time: Value,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub creator: Option<Snowflake>,
    #[serde(default)]
    pub user_count: Option<u64>,
    /// Fields the bot sends that the portal does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Event {
    /// `start_time` as an instant, if it is an RFC 3339 string, a plain
    /// `YYYY-MM-DD[ HH:MM[:SS]]` string (read as UTC) or epoch milliseconds.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        match &self.start_time {
            Value::String(s) => parse_instant(s.trim()),
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }
}

const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
        .map(|t| t.and_utc())
}

/// Upcoming events ordered by start time, earliest first. Events whose
/// start cannot be read keep their relative order after the rest.
pub fn upcoming(events: &[Event]) -> Vec<Event> {
    let mut out: Vec<(Option<DateTime<Utc>>, Event)> = events
        .iter()
        .filter(|e| e.status.is_upcoming())
        .map(|e| (e.starts_at(), e.clone()))
        .collect();
    out.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    out.into_iter().map(|(_, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(id: &str, status: &str, start: &str) -> Event {
        serde_json::from_value(json!({
            "id": id, "name": format!("event {id}"), "status": status, "start_time": start
        }))
        .unwrap()
    }

    #[test]
    fn upcoming_filters_and_sorts_ascending() {
        let events = vec![
            event("1", "active", "2026-05-03T10:00:00Z"),
            event("2", "completed", "2026-05-01T10:00:00Z"),
            event("3", "scheduled", "2026-05-02T10:00:00Z"),
            event("4", "cancelled", "2026-05-04T10:00:00Z"),
        ];
        let ids: Vec<_> = upcoming(&events).into_iter().map(|e| e.id.into_string()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn unknown_status_is_never_upcoming() {
        let e = event("9", "postponed", "2026-05-02T10:00:00Z");
        assert_eq!(e.status, EventStatus::Unknown);
        assert!(upcoming(&[e]).is_empty());
    }

    #[test]
    fn unrecognised_fields_survive_a_round_trip() {
        let e: Event = serde_json::from_value(json!({
            "id": 1187654321098765432u64, "name": "Build night", "status": "scheduled",
            "start_time": "2026-05-02T10:00:00Z", "image": "cover.png"
        }))
        .unwrap();
        assert_eq!(e.id.as_str(), "1187654321098765432");
        let back = serde_json::to_value(&e).unwrap();
        assert_eq!(back["image"], "cover.png");
    }

    #[test]
    fn null_user_count_and_missing_name_are_accepted() {
        let e: Event = serde_json::from_value(json!({
            "id": "5", "status": "active", "start_time": "2026-05-02T10:00:00Z", "user_count": null
        }))
        .unwrap();
        assert_eq!(e.user_count, None);
        assert_eq!(e.name, None);
    }

    #[test]
    fn offset_timestamps_are_kept_verbatim() {
        let e = event("6", "scheduled", "2026-07-01T20:00:00+02:00");
        let back = serde_json::to_value(&e).unwrap();
        assert_eq!(back["start_time"], "2026-07-01T20:00:00+02:00");
        assert_eq!(e.starts_at().unwrap().to_rfc3339(), "2026-07-01T18:00:00+00:00");
    }

    #[test]
    fn loose_and_unreadable_starts_still_sort() {
        let events = vec![
            event("1", "active", "soon"),
            event("2", "scheduled", "2026-07-01 18:00"),
            event("3", "scheduled", "2026-07-01T17:00:00Z"),
            event("4", "active", "2026-06-30"),
        ];
        let ids: Vec<_> = upcoming(&events).into_iter().map(|e| e.id.into_string()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);
        assert_eq!(serde_json::to_value(&events[1]).unwrap()["start_time"], "2026-07-01 18:00");
    }
}
