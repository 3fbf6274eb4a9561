//! Time sources and validity windows
//!
//! Engine code never reads the system clock directly. Callers inject a
//! [`Clock`], so a computation can be replayed in tests with a [`FixedClock`].

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Returns the current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Timezone wrapper used when rendering local dates
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Gulf Standard Time, used for quotations issued in the UAE
    pub fn gulf() -> Self {
        Self(chrono_tz::Asia::Dubai)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Calendar date of the given instant in this timezone
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must be before end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}

/// Half-open interval during which a quoted price holds
///
/// `starts_at` is inclusive, `expires_at` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ValidityWindow {
    /// Creates a bounded window
    pub fn new(starts_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Result<Self, TemporalError> {
        if starts_at >= expires_at {
            return Err(TemporalError::InvalidPeriod {
                start: starts_at.to_string(),
                end: expires_at.to_string(),
            });
        }
        Ok(Self { starts_at, expires_at })
    }

    /// Creates a window of `duration` starting at `starts_at`
    pub fn starting(starts_at: DateTime<Utc>, duration: Duration) -> Result<Self, TemporalError> {
        let expires_at = starts_at
            .checked_add_signed(duration)
            .ok_or_else(|| TemporalError::InvalidDuration(duration.to_string()))?;
        Self::new(starts_at, expires_at)
    }

    /// Returns true if the window contains the given timestamp
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.starts_at && timestamp < self.expires_at
    }

    /// Returns true once the window has closed
    pub fn is_expired_at(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.expires_at
    }

    /// Returns the length of the window
    pub fn duration(&self) -> Duration {
        self.expires_at - self.starts_at
    }
}
