//! Elapsed-time refresh schedule
//!
//! The host polls the timer; it never runs on its own. Cancelling it is the
//! only way to stop refreshes, and a cancelled timer never fires.

use chrono::{DateTime, TimeDelta, Utc};

use crate::consts::TIMER_INTERVAL_MS;

/// Recurring, cancellable one-second schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElapsedTimer {
    interval: TimeDelta,
    next_due: Option<DateTime<Utc>>,
}

impl Default for ElapsedTimer {
    fn default() -> Self {
        Self::new(TimeDelta::milliseconds(TIMER_INTERVAL_MS))
    }
}

impl ElapsedTimer {
    pub fn new(interval: TimeDelta) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Schedule the first fire one interval after `now`
    pub fn arm(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when at least one interval boundary has passed.
    ///
    /// Missed boundaries coalesce into a single fire.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let Some(mut due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        while due <= now {
            due += self.interval;
        }
        self.next_due = Some(due);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_clock;

    #[test]
    fn test_fires_once_per_interval() {
        let mut clock = fixed_clock();
        let mut timer = ElapsedTimer::default();
        timer.arm(clock.now());

        assert!(!timer.poll(clock.now()));
        clock.advance(TimeDelta::milliseconds(999));
        assert!(!timer.poll(clock.now()));
        clock.advance(TimeDelta::milliseconds(1));
        assert!(timer.poll(clock.now()));
        assert!(!timer.poll(clock.now()));
    }

    #[test]
    fn test_missed_fires_coalesce() {
        let mut clock = fixed_clock();
        let mut timer = ElapsedTimer::default();
        timer.arm(clock.now());

        clock.advance(TimeDelta::milliseconds(3500));
        assert!(timer.poll(clock.now()));
        assert!(!timer.poll(clock.now()));

        // Next boundary is 4s after arming
        clock.advance(TimeDelta::milliseconds(500));
        assert!(timer.poll(clock.now()));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut clock = fixed_clock();
        let mut timer = ElapsedTimer::default();
        timer.arm(clock.now());
        timer.cancel();

        clock.advance(TimeDelta::seconds(10));
        assert!(!timer.is_armed());
        assert!(!timer.poll(clock.now()));
    }
}
