//! Clock abstraction for deterministic timing in the game and tests.

use chrono::{DateTime, TimeDelta, Utc};

/// Time source for session start/end stamps and the elapsed timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Current system time
    #[default]
    Default,
    /// Frozen at an instant; only moves through `advance`
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock fixed at the given timestamp.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: TimeDelta) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a `Clock` fixed at the deterministic test timestamp.
///
/// Falls back to the Unix epoch if the timestamp cannot be represented.
pub fn fixed_clock() -> Clock {
    Clock::fixed(DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0).unwrap_or_default())
}
