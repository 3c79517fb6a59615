use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::dates::DaySpan;
use crate::error::BindingError;
use crate::models::{Entry, SearchEntry};
use crate::rehydrate::Model;
use crate::timestamp::Timestamp;

pub const DAY_ENTRY_LIMIT: u32 = 100;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("connect: {0}")]
    Connection(String),

    #[error("ping: {0}")]
    Ping(#[source] Box<BackendError>),

    #[error("request failed: {0}")]
    Request(String),

    #[error(transparent)]
    Binding(#[from] BindingError),
}

pub trait Backend {
    fn connect(&mut self) -> Result<(), BackendError>;
    fn ping(&mut self) -> Result<(), BackendError>;
    fn close(&mut self) -> Result<(), BackendError>;
    fn active_entry(&mut self) -> Result<Value, BackendError>;
    fn entry_list(&mut self, search: &SearchEntry) -> Result<Value, BackendError>;
}

pub struct Bridge<B> {
    backend: B,
}

impl<B: Backend> Bridge<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A backend that cannot be pinged is closed again.
    pub fn connect(&mut self) -> Result<(), BackendError> {
        if let Err(err) = self.backend.connect() {
            error!(error = %err, "Failed to connect to Dinkur.");
            return Err(err);
        }
        if let Err(err) = self.backend.ping() {
            error!(error = %err, "Failed to ping Dinkur.");
            if let Err(close_err) = self.backend.close() {
                debug!(error = %close_err, "Close after failed ping also failed.");
            }
            return Err(BackendError::Ping(Box::new(err)));
        }
        info!("Successfully connected to Dinkur!");
        Ok(())
    }

    pub fn disconnect(&mut self) -> Result<(), BackendError> {
        let result = self.backend.close();
        if let Err(err) = &result {
            error!(error = %err, "Failed to close connection to Dinkur.");
        }
        result
    }

    pub fn active_entry(&mut self) -> Result<Option<Entry>, BackendError> {
        let payload = self.backend.active_entry()?;
        if payload.is_null() {
            return Ok(None);
        }
        Ok(Some(Entry::create_from(payload)?))
    }

    pub fn entries_for_day(&mut self, day: NaiveDate) -> Result<Vec<Entry>, BackendError> {
        let span = DaySpan::for_day(day);
        let search = span.to_search(DAY_ENTRY_LIMIT);
        debug!(
            day = %day.format("%Y-%m-%d"),
            start = %span.start().to_rfc3339(),
            end = %span.end().to_rfc3339(),
            "Getting entries for day."
        );
        let result = self
            .backend
            .entry_list(&search)
            .and_then(|payload| Entry::create_many_from(payload).map_err(BackendError::from));
        match &result {
            Ok(entries) => debug!(count = entries.len(), "Got entries response."),
            Err(err) => debug!(error = %err, count = 0, "Got entries response."),
        }
        result
    }
}

/// Answers from a captured payload (one entry or a list) instead of a live
/// daemon. Searches filter on `start` and honor `limit`.
#[derive(Debug, Clone, Default)]
pub struct ReplayBackend {
    entries: Vec<Value>,
    connected: bool,
}

impl ReplayBackend {
    pub fn new(payload: Value) -> Self {
        let entries = match payload {
            Value::Null => Vec::new(),
            Value::Array(items) => items.into_iter().filter(|item| !item.is_null()).collect(),
            single => vec![single],
        };
        Self {
            entries,
            connected: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn ensure_connected(&self) -> Result<(), BackendError> {
        if self.connected {
            Ok(())
        } else {
            Err(BackendError::Request("not connected".to_string()))
        }
    }
}

impl Backend for ReplayBackend {
    fn connect(&mut self) -> Result<(), BackendError> {
        self.connected = true;
        Ok(())
    }

    fn ping(&mut self) -> Result<(), BackendError> {
        self.ensure_connected()
    }

    fn close(&mut self) -> Result<(), BackendError> {
        self.connected = false;
        Ok(())
    }

    fn active_entry(&mut self) -> Result<Value, BackendError> {
        self.ensure_connected()?;
        let active = self
            .entries
            .iter()
            .find(|entry| entry.get("end").is_none_or(Value::is_null))
            .cloned();
        Ok(active.unwrap_or(Value::Null))
    }

    fn entry_list(&mut self, search: &SearchEntry) -> Result<Value, BackendError> {
        self.ensure_connected()?;
        let mut matched = Vec::new();
        for entry in &self.entries {
            if matched.len() >= search.limit as usize {
                break;
            }
            let start = match entry.get("start") {
                Some(value) => serde_json::from_value::<Timestamp>(value.clone())
                    .map_err(|err| BackendError::Request(format!("entry start: {err}")))?,
                None => Timestamp::zero(),
            };
            let after_start = search.start.is_none_or(|bound| start >= bound);
            let before_end = search.end.is_none_or(|bound| start <= bound);
            if after_start && before_end {
                matched.push(entry.clone());
            }
        }
        Ok(Value::Array(matched))
    }
}
