//! Wire timestamps.
//!
//! # Design
//! `Timestamp` wraps a UTC `DateTime`. On the wire it is RFC 3339 text with a
//! `Z` suffix; fractional seconds are written only when present, so a value
//! read from the server encodes back to the same instant. Decoding also
//! accepts integer Unix seconds, which some endpoints return.
//!
//! Unparseable text is reported as `ApiError::MalformedTimestamp`, never
//! replaced by the epoch. Only years 0..=9999 are accepted or emitted, since
//! RFC 3339 text has no form for the rest.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ApiError, MALFORMED_TIMESTAMP};

/// A point in time, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(time)
    }

    /// Parse RFC 3339 text, converting any offset to UTC.
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        DateTime::parse_from_rfc3339(text)
            .map(|t| Self(t.with_timezone(&Utc)))
            .map_err(|_| ApiError::MalformedTimestamp(format!("{text:?}")))
    }

    /// Build from whole seconds since the Unix epoch.
    pub fn from_unix(secs: i64) -> Result<Self, ApiError> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .filter(in_wire_range)
            .map(Self)
            .ok_or_else(|| ApiError::MalformedTimestamp(secs.to_string()))
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

fn in_wire_range(time: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&time.year())
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

impl FromStr for Timestamp {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !in_wire_range(&self.0) {
            return Err(ser::Error::custom(format!("year {} cannot be written as RFC 3339", self.0.year())));
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl TimestampVisitor {
    fn malformed<E: de::Error>(shown: impl fmt::Display) -> E {
        E::custom(format!("{MALFORMED_TIMESTAMP}: {shown}"))
    }
}

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 date-time string or Unix seconds")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Timestamp::parse(v).map_err(|_| Self::malformed(format_args!("{v:?}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Timestamp::from_unix(v).map_err(|_| Self::malformed(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        let secs = i64::try_from(v).map_err(|_| Self::malformed(v))?;
        self.visit_i64(secs)
    }
}
