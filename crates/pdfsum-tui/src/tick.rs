use std::time::{Duration, Instant};

/// Paces `Action::Tick` at a fixed rate, however often the loop wakes up.
#[derive(Debug, Clone)]
pub struct TickClock {
    rate: Duration,
    next: Instant,
}

impl TickClock {
    pub fn new(rate: Duration, now: Instant) -> Self {
        Self {
            rate,
            next: now + rate,
        }
    }

    /// How long an input poll may block before the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// True at most once per period. Missed periods are not replayed.
    pub fn is_due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.rate;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: Duration = Duration::from_millis(100);

    #[test]
    fn frequent_wakeups_do_not_speed_up_ticks() {
        let start = Instant::now();
        let mut clock = TickClock::new(RATE, start);
        let ticks = (1..=50u64)
            .filter(|i| clock.is_due(start + Duration::from_millis(i * 10)))
            .count();
        assert_eq!(ticks, 5);
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let start = Instant::now();
        let clock = TickClock::new(RATE, start);
        assert_eq!(clock.remaining(start), RATE);
        assert_eq!(clock.remaining(start + Duration::from_millis(30)), Duration::from_millis(70));
        assert_eq!(clock.remaining(start + Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn a_long_stall_yields_one_tick() {
        let start = Instant::now();
        let mut clock = TickClock::new(RATE, start);
        let late = start + Duration::from_secs(2);
        assert!(clock.is_due(late));
        assert!(!clock.is_due(late));
        assert_eq!(clock.remaining(late), RATE);
    }
}
