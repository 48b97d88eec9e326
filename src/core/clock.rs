//! Source of "now" for every operation that needs it.
//!
//! Operations take a `&dyn Clock` so tests can pin the evaluation instant
//! with [`FixedClock`].

use chrono::Utc;

pub trait Clock {
    /// Current UTC time as integer seconds since the epoch.
    fn now_ts(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ts(&self) -> i64 {
        Utc::now().timestamp()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ts(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(clock.now_ts(), 1_700_000_000);
        assert_eq!(clock.now_ts(), clock.now_ts());
    }

    #[test]
    fn system_clock_is_recent() {
        // 2023-11-14, well before any plausible test run.
        assert!(SystemClock.now_ts() > 1_700_000_000);
    }
}
