use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::bridge::{BackendError, Bridge, ReplayBackend};
use crate::models::Entry;
use crate::rehydrate::{Mode, Rehydrated, rehydrate};
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All(Mode),
    Day(NaiveDate),
    Active,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    List(Vec<Entry>),
    Keyed(BTreeMap<String, Vec<Entry>>),
}

impl Listing {
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Listing::List(entries) => serde_json::to_string_pretty(entries),
            Listing::Keyed(entries) => serde_json::to_string_pretty(entries),
        }
    }

    pub fn to_text(&self, now: DateTime<Utc>) -> String {
        match self {
            Listing::List(entries) => render::format_entries(entries, now),
            Listing::Keyed(entries) => render::format_keyed_entries(entries, now),
        }
    }
}

/// A payload holding no entries at all (a bare string or number) gives an
/// empty list and a warning rather than an error.
pub fn decode(payload: Value, selection: Selection) -> Result<Listing, BackendError> {
    match selection {
        Selection::Day(day) => {
            let mut bridge = Bridge::new(ReplayBackend::new(payload));
            bridge.connect()?;
            let entries = bridge.entries_for_day(day)?;
            bridge.disconnect()?;
            Ok(Listing::List(entries))
        }
        Selection::Active => {
            let mut bridge = Bridge::new(ReplayBackend::new(payload));
            bridge.connect()?;
            let active = bridge.active_entry()?;
            bridge.disconnect()?;
            if active.is_none() {
                info!("No active entry.");
            }
            Ok(Listing::List(active.into_iter().collect()))
        }
        Selection::All(mode) => Ok(match rehydrate::<Entry>(payload, mode)? {
            Rehydrated::Primitive(value) => {
                warn!(payload = %value, "Payload holds no entries.");
                Listing::List(Vec::new())
            }
            map @ Rehydrated::Map(_) => Listing::Keyed(map.into_map().unwrap_or_default()),
            other => Listing::List(other.into_vec()),
        }),
    }
}
