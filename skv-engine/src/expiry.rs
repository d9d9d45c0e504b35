//! # Expiry Policy
//!
//! Pure staleness decision. The policy never touches storage; whoever asks is
//! responsible for purging a stale record.

use skv_common::{Record, TimeToLive, Timestamp};

/// Returns true if `record` outlived `ttl` at time `now`.
///
/// No time-to-live means the record never expires. The comparison is strict,
/// so a record checked in the same millisecond its lifetime ends is still
/// fresh, including with a zero time-to-live.
pub fn is_stale(record: &Record, ttl: Option<TimeToLive>, now: Timestamp) -> bool {
    match ttl {
        None => false,
        Some(ttl) => now > expires_at(record, ttl),
    }
}

/// Last millisecond at which `record` is still fresh.
pub fn expires_at(record: &Record, ttl: TimeToLive) -> Timestamp {
    record.created_at.saturating_add(ttl.as_millis())
}
