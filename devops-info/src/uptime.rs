//! Process uptime tracking.
//!
//! The start instant is captured once when the service initialises and is
//! never mutated afterwards. Uptime is recomputed from the wall clock on every
//! call; nothing is cached.

use chrono::{DateTime, Utc};
use serde::Serialize;

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MINUTE: u64 = 60;

/// Wall-clock instant at which the process started serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartInstant(DateTime<Utc>);

impl StartInstant {
    /// Capture the current instant.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Uptime as of the current wall-clock time.
    pub fn uptime(&self) -> Uptime {
        self.uptime_at(Utc::now())
    }

    /// Uptime as of `now`. A `now` earlier than the start instant (clock moved
    /// backward) yields zero.
    pub fn uptime_at(&self, now: DateTime<Utc>) -> Uptime {
        Uptime::from_elapsed_secs((now - self.0).num_seconds())
    }
}

/// Elapsed time since start, in whole seconds and as an hours/minutes string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uptime {
    pub seconds: u64,
    pub human: String,
}

impl Uptime {
    /// Build a report from a signed elapsed second count, clamping negatives to zero.
    pub fn from_elapsed_secs(elapsed: i64) -> Self {
        let seconds = u64::try_from(elapsed).unwrap_or(0);
        let hours = seconds / SECS_PER_HOUR;
        let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;

        Self {
            seconds,
            human: format!("{} hours, {} minutes", hours, minutes),
        }
    }
}
