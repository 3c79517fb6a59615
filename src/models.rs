use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::rehydrate::Model;
use crate::timestamp::Timestamp;

/// A time-tracking record as produced by the backend.
///
/// Fields missing from a payload keep their unset value (`0`, an empty
/// name, the zero time) and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub start: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
}

impl Model for Entry {}

impl Entry {
    /// An entry without an end is still tracking time.
    pub fn is_active(&self) -> bool {
        self.end.is_none()
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        let end = self.end.map(|end| end.to_utc()).unwrap_or(now);
        end - self.start.to_utc()
    }
}

/// Query for an entry list. Unset bounds are left out of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ts(value: &str) -> Timestamp {
        Timestamp::parse(value).unwrap()
    }

    #[test]
    fn decodes_wire_names() {
        let entry: Entry = serde_json::from_value(json!({
            "id": 7,
            "createdAt": "2026-02-03T08:00:00Z",
            "updatedAt": "2026-02-03T08:30:00Z",
            "name": "Review",
            "start": "2026-02-03T08:00:00Z",
            "end": "2026-02-03T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(
            entry,
            Entry {
                id: 7,
                created_at: ts("2026-02-03T08:00:00Z"),
                updated_at: ts("2026-02-03T08:30:00Z"),
                name: "Review".to_string(),
                start: ts("2026-02-03T08:00:00Z"),
                end: Some(ts("2026-02-03T08:30:00Z")),
            }
        );
    }

    #[test]
    fn missing_and_null_fields_stay_unset() {
        let entry: Entry = serde_json::from_value(json!({
            "id": null,
            "name": null,
            "start": "2026-02-03T08:00:00Z",
            "end": null
        }))
        .unwrap();

        assert_eq!(entry.id, 0);
        assert_eq!(entry.name, "");
        assert!(entry.created_at.is_zero());
        assert!(entry.updated_at.is_zero());
        assert_eq!(entry.end, None);
    }

    #[test]
    fn active_entry_elapsed_runs_to_now() {
        let entry = Entry {
            start: ts("2026-02-03T08:00:00Z"),
            ..Entry::default()
        };
        let now = ts("2026-02-03T09:30:00Z").to_utc();
        assert!(entry.is_active());
        assert_eq!(entry.elapsed(now), Duration::minutes(90));
    }

    #[test]
    fn finished_entry_elapsed_ignores_now() {
        let entry = Entry {
            start: ts("2026-02-03T08:00:00Z"),
            end: Some(ts("2026-02-03T08:45:00Z")),
            ..Entry::default()
        };
        let now = ts("2026-02-04T00:00:00Z").to_utc();
        assert!(!entry.is_active());
        assert_eq!(entry.elapsed(now), Duration::minutes(45));
    }

    #[test]
    fn search_omits_unset_bounds() {
        let search = SearchEntry {
            limit: 100,
            start: Some(ts("2026-02-03T00:00:00Z")),
            end: None,
        };
        assert_eq!(
            serde_json::to_value(&search).unwrap(),
            json!({ "limit": 100, "start": "2026-02-03T00:00:00Z" })
        );
    }
}
