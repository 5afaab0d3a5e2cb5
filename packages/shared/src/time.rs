//! Time-related utilities with clock abstraction for testability.
//!
//! Timestamps travel through the system as Unix milliseconds (UTC). They are
//! rendered with a fixed UTC offset chosen by configuration: a short clock
//! time for chat display, RFC 3339 for the HTTP API.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Resolve a UTC offset in minutes. Out-of-range offsets fall back to UTC.
pub fn utc_offset(offset_minutes: i32) -> FixedOffset {
    offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

fn to_offset_datetime(timestamp_millis: i64, offset_minutes: i32) -> DateTime<FixedOffset> {
    DateTime::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&utc_offset(offset_minutes))
}

/// Format a Unix timestamp (milliseconds) as a short clock time, e.g. `3:07 pm`
pub fn format_display_time(timestamp_millis: i64, offset_minutes: i32) -> String {
    to_offset_datetime(timestamp_millis, offset_minutes)
        .format("%-I:%M %P")
        .to_string()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format
pub fn timestamp_to_rfc3339(timestamp_millis: i64, offset_minutes: i32) -> String {
    to_offset_datetime(timestamp_millis, offset_minutes).to_rfc3339()
}
