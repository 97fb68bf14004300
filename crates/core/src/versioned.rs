//! Versioned-value contract types
//!
//! Every read of the facade's mutable state returns data wrapped in
//! `Versioned<T>`: the value, the version that produced it, and a creation
//! timestamp. Every mutation produces a new version. This is what makes
//! atomicity externally observable: a snapshot whose version was never
//! produced by a completed mutation cannot exist.
//!
//! ## Version Variants
//!
//! The two mutable regions version independently:
//!
//! - **Control**: the facade's control pair (implementation reference +
//!   admin identity). Bumped once per completed admin mutation.
//! - **Context**: the business-data region forwarded calls execute against.
//!   Bumped once per context write.
//!
//! Versions are comparable within the same variant; cross-variant
//! comparison is undefined (`partial_cmp` returns `None`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Version identifier for a mutation
///
/// ## Invariants
///
/// - Versions are monotonically increasing within a region
/// - Versions within the same variant are totally ordered
/// - Cross-variant comparison is not meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    /// Control-pair version: bumped by completed admin mutations
    Control(u64),
    /// Context-region version: bumped by context writes
    Context(u64),
}

impl Version {
    /// Create a Control version
    pub const fn control(n: u64) -> Self {
        Version::Control(n)
    }

    /// Create a Context version
    pub const fn context(n: u64) -> Self {
        Version::Context(n)
    }

    /// Get the numeric value
    ///
    /// Useful for storage and display, but NOT for cross-variant comparison.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        match self {
            Version::Control(v) => *v,
            Version::Context(v) => *v,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Version::Control(a), Version::Control(b)) => a.partial_cmp(b),
            (Version::Context(a), Version::Context(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Microsecond-precision timestamp
///
/// Represents a point in time as microseconds since Unix epoch. Returned on
/// every versioned read; never used for dispatch decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Create a timestamp for the current moment
    ///
    /// Uses system time. Returns epoch (0) if the system clock is before
    /// Unix epoch (e.g., clock went backwards due to NTP adjustment).
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_micros() as u64)
    }

    /// Create a timestamp from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    /// Get microseconds since Unix epoch
    #[inline]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Duration since an earlier timestamp, None if `earlier` is later
    pub fn duration_since(&self, earlier: Timestamp) -> Option<Duration> {
        self.0
            .checked_sub(earlier.0)
            .map(Duration::from_micros)
    }

    /// Render as an RFC 3339 string (UTC, microsecond precision)
    ///
    /// Used by log output; timestamps outside chrono's representable range
    /// fall back to the raw microsecond count.
    pub fn to_rfc3339(&self) -> String {
        match DateTime::<Utc>::from_timestamp_micros(self.0 as i64) {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Micros, true),
            None => format!("{}us", self.0),
        }
    }
}

/// A value with its version information
///
/// ## Invariants
///
/// - `version` always matches the mutation that created this data
/// - `timestamp` is always the creation time of this version
/// - Value is never modified after creation (immutable versions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// The actual value
    pub value: T,

    /// Version identifier
    pub version: Version,

    /// Creation timestamp (microseconds since epoch)
    pub timestamp: Timestamp,
}

impl<T> Versioned<T> {
    /// Create a new versioned value with current timestamp
    pub fn new(value: T, version: Version) -> Self {
        Versioned {
            value,
            version,
            timestamp: Timestamp::now(),
        }
    }

    /// Create a versioned value with explicit timestamp
    pub fn with_timestamp(value: T, version: Version, timestamp: Timestamp) -> Self {
        Versioned {
            value,
            version,
            timestamp,
        }
    }

    /// Map the inner value to a new type
    pub fn map<U, F>(self, f: F) -> Versioned<U>
    where
        F: FnOnce(T) -> U,
    {
        Versioned {
            value: f(self.value),
            version: self.version,
            timestamp: self.timestamp,
        }
    }

    /// Get a reference to the inner value
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume and return the inner value
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Get the version
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get the timestamp
    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
