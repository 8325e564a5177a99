//! Unit tests for the chat context.

mod memory_store_tests;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl FixedClock {
    pub(super) fn at(seconds: i64) -> Self {
        Self(
            Utc.timestamp_opt(seconds, 0)
                .single()
                .expect("test instant should be valid"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
