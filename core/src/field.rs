//! Presence-tracking field holder for wire records.
//!
//! # Design
//! `Field<T>` is either `Absent` or `Present(T)`. Records declare every wire
//! field as a `Field` with
//! `#[serde(default, skip_serializing_if = "Field::is_absent")]`, so:
//!
//! - encoding omits an absent field entirely, while a present field is always
//!   emitted, even when it holds `0`, `""` or `false`;
//! - decoding a missing key yields `Absent`, and any value yields `Present`.
//!
//! An explicit JSON `null` decodes to `Absent`: the server uses `null` for
//! "no value", and re-encoding such a record must not invent a zero value.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ApiError;

/// A wire field that is either absent or present with a value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field<T> {
    /// The field was not sent / not received.
    Absent,
    /// The field was sent / received with this value.
    Present(T),
}

impl<T> Field<T> {
    pub fn present(value: T) -> Self {
        Field::Present(value)
    }

    pub fn absent() -> Self {
        Field::Absent
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Borrow the value, failing with `ApiError::ValueNotPresent` when absent.
    pub fn value(&self) -> Result<&T, ApiError> {
        match self {
            Field::Present(v) => Ok(v),
            Field::Absent => Err(ApiError::ValueNotPresent),
        }
    }

    /// Take the value, failing with `ApiError::ValueNotPresent` when absent.
    pub fn into_value(self) -> Result<T, ApiError> {
        match self {
            Field::Present(v) => Ok(v),
            Field::Absent => Err(ApiError::ValueNotPresent),
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Present(v) => Field::Present(v),
            Field::Absent => Field::Absent,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Present(v) => Field::Present(f(v)),
            Field::Absent => Field::Absent,
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T: Default> Field<T> {
    /// The held value, or `T`'s zero value when absent.
    pub fn unwrap_or_default(self) -> T {
        match self {
            Field::Present(v) => v,
            Field::Absent => T::default(),
        }
    }
}

impl Field<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.get().map(String::as_str)
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T: fmt::Debug> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Present(v) => write!(f, "Present({v:?})"),
            Field::Absent => f.write_str("Absent"),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        }
    }
}

impl<T> From<Field<T>> for Option<T> {
    fn from(field: Field<T>) -> Self {
        match field {
            Field::Present(v) => Some(v),
            Field::Absent => None,
        }
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Present(value.to_string())
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(v) => v.serialize(serializer),
            // Only reached when a record forgets `skip_serializing_if`.
            Field::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}
