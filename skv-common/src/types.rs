//! # Shared Value Types
//!
//! Backend selection and time-to-live values shared by the engine and the
//! client handle.
//!
//! ## Design Principles
//!
//! 1. **Lenient Parsing**: Unknown backend names and time units fall back to
//!    fixed defaults instead of failing construction.
//! 2. **Single Unit**: Every time-to-live is normalized to milliseconds once,
//!    at parse time.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Which physical store an endpoint lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum BackendKind {
    /// Survives restarts of the host.
    #[default]
    Durable,
    /// Scoped to the host session.
    Session,
}

impl BackendKind {
    /// Parses a backend name. Unrecognized names resolve to `Durable`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "session" | "sessionstorage" => Self::Session,
            _ => Self::Durable,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Session => "session",
        }
    }
}

impl From<String> for BackendKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

/// Non-string values (numbers, objects, booleans) resolve to `Durable`.
impl From<Value> for BackendKind {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::parse(&name),
            _ => Self::Durable,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit for a `{length, unit}` time-to-live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Parses a unit name. Unrecognized names resolve to `Days`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "seconds" | "second" => Self::Seconds,
            "minutes" | "minute" => Self::Minutes,
            "hours" | "hour" => Self::Hours,
            _ => Self::Days,
        }
    }

    /// Milliseconds in one unit.
    pub const fn millis(self) -> u64 {
        match self {
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }
}

/// A normalized time-to-live in milliseconds.
///
/// Deserializes from either a bare number (milliseconds) or a
/// `{ "length": n, "unit": "minutes" }` object, where `n` may be fractional.
/// A zero value expires one millisecond after creation; it does not mean
/// "never".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TtlRepr", into = "u64")]
pub struct TimeToLive(u64);

impl TimeToLive {
    pub const fn from_millis(millis: u64) -> Self {
        TimeToLive(millis)
    }

    /// Builds a time-to-live from a unit count. A missing length means one unit.
    pub fn from_span(length: Option<u64>, unit: TimeUnit) -> Self {
        TimeToLive(length.unwrap_or(1).saturating_mul(unit.millis()))
    }

    /// Like [`TimeToLive::from_span`] for fractional counts, rounded to the
    /// nearest millisecond. Negative counts clamp to zero.
    pub fn from_fractional_span(length: f64, unit: TimeUnit) -> Self {
        // Float-to-int `as` saturates at both ends.
        TimeToLive((length * unit.millis() as f64).round() as u64)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl From<TimeToLive> for u64 {
    fn from(ttl: TimeToLive) -> Self {
        ttl.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TtlRepr {
    Millis(u64),
    FractionalMillis(f64),
    Span {
        length: Option<f64>,
        #[serde(alias = "format")]
        unit: Option<String>,
    },
}

impl From<TtlRepr> for TimeToLive {
    fn from(repr: TtlRepr) -> Self {
        match repr {
            TtlRepr::Millis(millis) => TimeToLive(millis),
            TtlRepr::FractionalMillis(millis) => TimeToLive(millis.round() as u64),
            TtlRepr::Span { length, unit } => {
                let unit = unit.as_deref().map_or(TimeUnit::Days, TimeUnit::parse);
                TimeToLive::from_fractional_span(length.unwrap_or(1.0), unit)
            }
        }
    }
}
