use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Provider-assigned player identifier.
pub type PlayerId = i64;

/// Canonical identifier of a UTC calendar day (`YYYY-MM-DD`).
///
/// Used both as the daily cache key and as the seed of the pool shuffle.
/// Ordering and equality follow the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateId(NaiveDate);

impl DateId {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The UTC calendar day containing `instant`.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// 32-byte RNG seed derived from the ISO representation of the day.
    pub fn seed(&self) -> [u8; 32] {
        Sha256::digest(self.to_string().as_bytes()).into()
    }
}

impl fmt::Display for DateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| CoreError::Validation(format!("invalid date '{s}': {e}")))
    }
}
