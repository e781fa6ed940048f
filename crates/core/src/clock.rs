//! Time source for server-assigned timestamps.
//!
//! Every timestamp the service writes (`created_at`, `updated_at`, the health check `time`, the
//! stub's `reported_at`) goes through a [`Clock`], so tests can pin time without sleeping.

use chrono::{DateTime, SecondsFormat, Utc};

/// Supplies the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time rendered in the service's timestamp format.
    fn now_text(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Wall-clock implementation backed by [`Utc::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Renders a timestamp as RFC 3339 with microseconds and an explicit `+00:00` offset.
///
/// Example: `2024-01-01T12:00:00.000000+00:00`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}
