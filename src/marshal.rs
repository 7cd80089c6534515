//! Encodings of a [`Date`].
//!
//! - text: the canonical `±YYYY-MM-DD` string, used by serde
//! - binary: the day count as a big-endian `i64`
//! - record: a struct with the day count as its only field, for RPC-style
//!   encoders that want a named field rather than a string

use serde::{Deserialize, Serialize};

use crate::consts::BINARY_LEN;
use crate::prelude::*;
use crate::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input is not exactly [`BINARY_LEN`] bytes long.
    #[error("cannot decode date: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    /// The decoded day count does not fit a `Date`.
    #[error("cannot decode date: day count {0} is out of range")]
    OutOfRange(i64),
}

impl Date {
    /// The day count as a big-endian `i64`
    pub fn to_bytes(self) -> [u8; BINARY_LEN] {
        i64::from(self.days_since_zero()).to_be_bytes()
    }

    /// Decodes the output of [`Date::to_bytes`].
    ///
    /// # Errors
    /// [`DecodeError::Length`] unless `bytes` is exactly [`BINARY_LEN`] long,
    /// and [`DecodeError::OutOfRange`] if the day count is not an `i32`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let bytes: [u8; BINARY_LEN] = bytes.try_into().map_err(|_| DecodeError::Length {
            expected: BINARY_LEN,
            actual:   bytes.len(),
        })?;
        let days = i64::from_be_bytes(bytes);
        i32::try_from(days)
            .map(Self::from_days)
            .map_err(|_| DecodeError::OutOfRange(days))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A [`Date`] as a record with a single `days` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into)]
pub struct DateRecord {
    /// Days since 0001-01-01
    pub days: i32,
}

impl From<Date> for DateRecord {
    fn from(date: Date) -> Self {
        Self {
            days: date.days_since_zero(),
        }
    }
}

impl From<DateRecord> for Date {
    fn from(record: DateRecord) -> Self {
        Self::from_days(record.days)
    }
}
