use std::time::Instant;

/// Single countdown for a session.
///
/// Elapsed time is derived from the start instant rather than by counting
/// callbacks, so late or missed ticks do not drift. Elapsed
/// time is still handed out in whole seconds through [`SessionClock::advance`].
#[derive(Debug, Clone)]
pub struct SessionClock {
    started_at: Instant,
    /// Total length including extensions
    budget_secs: u64,
    /// Whole seconds already handed to the ledger
    accounted_secs: u64,
}

impl SessionClock {
    pub fn start(total_secs: u64, now: Instant) -> Self {
        Self {
            started_at: now,
            budget_secs: total_secs,
            accounted_secs: 0,
        }
    }

    /// Whole seconds newly elapsed since the last call, capped at the deadline
    pub fn advance(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started_at).as_secs();
        let capped = elapsed.min(self.budget_secs);
        let fresh = capped.saturating_sub(self.accounted_secs);
        self.accounted_secs = self.accounted_secs.max(capped);
        fresh
    }

    /// Seconds left that have not been accounted yet
    pub fn remaining_secs(&self) -> u64 {
        self.budget_secs.saturating_sub(self.accounted_secs)
    }

    pub fn total_secs(&self) -> u64 {
        self.budget_secs
    }

    pub fn is_expired(&self) -> bool {
        self.accounted_secs >= self.budget_secs
    }

    /// Push the deadline back
    pub fn extend(&mut self, secs: u64) {
        self.budget_secs = self.budget_secs.saturating_add(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_advance_counts_whole_seconds() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(10, t0);

        assert_eq!(clock.advance(t0 + Duration::from_millis(400)), 0);
        assert_eq!(clock.advance(t0 + Duration::from_millis(1100)), 1);
        assert_eq!(clock.advance(t0 + Duration::from_millis(1900)), 0);
        assert_eq!(clock.remaining_secs(), 9);
    }

    #[test]
    fn test_missed_callbacks_catch_up() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(60, t0);

        assert_eq!(clock.advance(t0 + Duration::from_secs(7)), 7);
        assert_eq!(clock.remaining_secs(), 53);
    }

    #[test]
    fn test_advance_is_capped_at_deadline() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(5, t0);

        assert_eq!(clock.advance(t0 + Duration::from_secs(30)), 5);
        assert!(clock.is_expired());
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(60, t0);
        clock.advance(t0 + Duration::from_secs(10));
        assert_eq!(clock.advance(t0 + Duration::from_secs(5)), 0);
        assert_eq!(clock.remaining_secs(), 50);
    }

    #[test]
    fn test_extend_moves_deadline() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(600, t0);
        clock.advance(t0 + Duration::from_secs(100));

        let before = clock.remaining_secs();
        clock.extend(300);
        assert_eq!(clock.remaining_secs(), before + 300);
        assert_eq!(clock.total_secs(), 900);
        assert_eq!(clock.advance(t0 + Duration::from_secs(900)), 800);
        assert!(clock.is_expired());
    }
}
