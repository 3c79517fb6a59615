use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unix seconds of `0001-01-01T00:00:00Z`, the backend's unset time.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

/// A point in time as carried on the wire.
///
/// Accepts RFC 3339 strings (the backend's native encoding) and numeric
/// Unix epoch milliseconds. A JSON `null` decodes to the zero time so that
/// required timestamp fields never fail on an unset value. Always encodes
/// back to RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn zero() -> Self {
        let zero = DateTime::from_timestamp(ZERO_UNIX_SECONDS, 0).unwrap_or_default();
        Self(zero.fixed_offset())
    }

    pub fn is_zero(&self) -> bool {
        self.0.timestamp() == ZERO_UNIX_SECONDS && self.0.timestamp_subsec_nanos() == 0
    }

    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value.trim()).map(Self)
    }

    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|dt| Self(dt.fixed_offset()))
    }

    fn from_fractional_millis(millis: f64) -> Option<Self> {
        if !millis.is_finite() {
            return None;
        }
        let micros = (millis * 1000.0).round();
        if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp_micros(micros as i64).map(|dt| Self(dt.fixed_offset()))
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    pub fn to_local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::zero()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.fixed_offset())
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp or epoch milliseconds")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
        Timestamp::parse(value)
            .map_err(|err| E::custom(format!("invalid timestamp {value:?}: {err}")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Timestamp, E> {
        Timestamp::from_epoch_millis(value)
            .ok_or_else(|| E::custom(format!("epoch milliseconds out of range: {value}")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Timestamp, E> {
        let millis = i64::try_from(value)
            .map_err(|_| E::custom(format!("epoch milliseconds out of range: {value}")))?;
        self.visit_i64(millis)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Timestamp, E> {
        Timestamp::from_fractional_millis(value)
            .ok_or_else(|| E::custom(format!("epoch milliseconds out of range: {value}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::zero())
    }
}
