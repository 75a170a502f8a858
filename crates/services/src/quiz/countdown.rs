/// Identifies one arming of a [`Countdown`].
///
/// Re-arming always yields a new token, so ticks scheduled for an earlier
/// question can be told apart and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Result of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Running { remaining: u32 },
    /// Reached zero on this tick. Happens at most once per arming.
    Expired,
    Disarmed,
}

/// Per-question countdown handle.
///
/// At most one arming is live at a time: `arm` disarms the previous one first.
#[derive(Debug, Clone)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
    generation: u64,
    armed: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(limit_secs: u32) -> Self {
        Self {
            limit: limit_secs,
            remaining: limit_secs,
            generation: 0,
            armed: false,
        }
    }

    /// Reset to the full limit and start counting under a fresh token.
    pub fn arm(&mut self) -> TimerToken {
        self.disarm();
        self.generation = self.generation.wrapping_add(1);
        self.remaining = self.limit;
        self.armed = true;
        TimerToken(self.generation)
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Token of the live arming, if any.
    #[must_use]
    pub fn token(&self) -> Option<TimerToken> {
        self.armed.then_some(TimerToken(self.generation))
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.armed {
            return CountdownTick::Disarmed;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            CountdownTick::Expired
        } else {
            CountdownTick::Running {
                remaining: self.remaining,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_once() {
        let mut countdown = Countdown::new(3);
        assert!(!countdown.is_armed());
        countdown.arm();
        assert!(countdown.is_armed());

        assert_eq!(countdown.tick(), CountdownTick::Running { remaining: 2 });
        assert_eq!(countdown.tick(), CountdownTick::Running { remaining: 1 });
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert_eq!(countdown.tick(), CountdownTick::Disarmed);
        assert!(!countdown.is_armed());
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.token().is_none());
    }

    #[test]
    fn rearming_invalidates_previous_token() {
        let mut countdown = Countdown::new(15);
        let first = countdown.arm();
        countdown.tick();

        let second = countdown.arm();
        assert_ne!(first, second);
        assert_eq!(countdown.token(), Some(second));
        assert_eq!(countdown.remaining(), 15);
    }

    #[test]
    fn unarmed_countdown_does_not_move() {
        let mut countdown = Countdown::new(15);
        assert_eq!(countdown.tick(), CountdownTick::Disarmed);
        assert_eq!(countdown.remaining(), 15);
    }
}
