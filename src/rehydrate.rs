use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::BindingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Object,
    Map,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rehydrated<T> {
    Absent,
    Primitive(Value),
    One(T),
    Many(Vec<Rehydrated<T>>),
    Map(BTreeMap<String, Rehydrated<T>>),
}

impl<T> Rehydrated<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Rehydrated::Absent)
    }

    pub fn into_one(self) -> Option<T> {
        match self {
            Rehydrated::One(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    pub fn into_map(self) -> Option<BTreeMap<String, Vec<T>>> {
        match self {
            Rehydrated::Map(entries) => Some(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into_vec()))
                    .collect(),
            ),
            _ => None,
        }
    }

    fn collect_into(self, out: &mut Vec<T>) {
        match self {
            Rehydrated::Absent | Rehydrated::Primitive(_) => {}
            Rehydrated::One(value) => out.push(value),
            Rehydrated::Many(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
            Rehydrated::Map(entries) => {
                for (_, value) in entries {
                    value.collect_into(out);
                }
            }
        }
    }
}

/// `null` stays [`Rehydrated::Absent`] whatever the shape. Map mode only
/// applies to `value` itself; nested values are rehydrated as objects.
pub fn rehydrate<T: DeserializeOwned>(value: Value, mode: Mode) -> Result<Rehydrated<T>, BindingError> {
    match value {
        Value::Null => Ok(Rehydrated::Absent),
        Value::Array(items) => items
            .into_iter()
            .map(|item| rehydrate(item, Mode::Object))
            .collect::<Result<Vec<_>, _>>()
            .map(Rehydrated::Many),
        Value::Object(fields) => match mode {
            Mode::Object => construct(fields).map(Rehydrated::One),
            Mode::Map => fields
                .into_iter()
                .map(|(key, value)| Ok((key, rehydrate(value, Mode::Object)?)))
                .collect::<Result<BTreeMap<_, _>, BindingError>>()
                .map(Rehydrated::Map),
        },
        primitive => Ok(Rehydrated::Primitive(primitive)),
    }
}

pub fn rehydrate_primitive(value: Value) -> Rehydrated<Value> {
    match value {
        Value::Null => Rehydrated::Absent,
        Value::Array(items) => Rehydrated::Many(items.into_iter().map(rehydrate_primitive).collect()),
        other => Rehydrated::Primitive(other),
    }
}

fn construct<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, BindingError> {
    serde_json::from_value(Value::Object(fields)).map_err(BindingError::shape::<T>)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Value(Value),
}

impl Payload {
    pub fn into_value(self) -> Result<Value, BindingError> {
        match self {
            Payload::Text(text) => serde_json::from_str(&text).map_err(BindingError::Malformed),
            Payload::Value(value) => Ok(value),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Value(value)
    }
}

pub trait Model: DeserializeOwned {
    fn create_from(source: impl Into<Payload>) -> Result<Self, BindingError> {
        let value = source.into().into_value()?;
        serde_json::from_value(value).map_err(BindingError::shape::<Self>)
    }

    /// `null` elements are skipped, never defaulted.
    fn create_many_from(source: impl Into<Payload>) -> Result<Vec<Self>, BindingError> {
        match source.into().into_value()? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => {
                let total = items.len();
                let records = items
                    .into_iter()
                    .filter(|item| !item.is_null())
                    .map(Self::create_from)
                    .collect::<Result<Vec<_>, _>>()?;
                if records.len() != total {
                    debug!(skipped = total - records.len(), "Skipped null records in list payload.");
                }
                Ok(records)
            }
            other => Self::create_from(other).map(|record| vec![record]),
        }
    }
}
