use chrono::{DateTime, Duration, Utc};

/// Wall-clock source for play-through timestamps.
///
/// The per-question countdown never reads this clock. It is tick-driven, so a
/// quiz paused by its host loses no question time. This clock only stamps when
/// a play-through started and completed, and how long it has been running.
/// Tests pin it with [`fixed_clock`] so summaries come out identical.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that reads the current system time.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock pinned to the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Time since `start`, clamped at zero if the system clock stepped back.
    #[must_use]
    pub fn elapsed_since(&self, start: DateTime<Utc>) -> Duration {
        (self.now() - start).max(Duration::zero())
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns the deterministic test timestamp.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` pinned at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_only_moves_when_advanced() {
        let mut clock = fixed_clock();
        assert_eq!(clock.now(), fixed_now());

        clock.advance(Duration::seconds(15));
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(15));
        assert!(clock.is_fixed());
    }

    #[test]
    fn elapsed_play_time_follows_the_clock() {
        let started = fixed_now();
        let mut clock = fixed_clock();
        assert_eq!(clock.elapsed_since(started), Duration::zero());

        clock.advance(Duration::seconds(47));
        assert_eq!(clock.elapsed_since(started), Duration::seconds(47));
    }

    #[test]
    fn elapsed_never_goes_negative() {
        let clock = fixed_clock();
        let later = fixed_now() + Duration::minutes(5);
        assert_eq!(clock.elapsed_since(later), Duration::zero());
    }

    #[test]
    fn advancing_system_clock_is_a_no_op() {
        let mut clock = Clock::system();
        clock.advance(Duration::days(1));
        assert!(!clock.is_fixed());
    }
}
