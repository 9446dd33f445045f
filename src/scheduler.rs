use std::time::{Duration, Instant};

/// The single periodic timer driving the simulation.
///
/// At most one deadline is armed at a time. Starting always replaces the
/// previous registration, so two tick streams can never overlap.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl TickScheduler {
    /// Arms the timer; the first tick fires one `interval` after `now`.
    pub fn start(&mut self, now: Instant, interval: Duration) {
        self.cancel();
        self.interval = interval;
        self.next_tick = Some(now + interval);
    }

    /// Disarms the timer. Idempotent.
    pub fn cancel(&mut self) {
        self.next_tick = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Returns true when a tick is due and re-arms for the following one.
    ///
    /// Missed deadlines are not caught up: the next tick is scheduled one
    /// interval after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or `None` when idle.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickScheduler;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn idle_scheduler_never_fires() {
        let mut scheduler = TickScheduler::default();
        let now = Instant::now();

        assert!(!scheduler.is_active());
        assert!(!scheduler.poll(now + Duration::from_secs(10)));
        assert_eq!(scheduler.time_until_next(now), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut scheduler = TickScheduler::default();
        let start = Instant::now();
        scheduler.start(start, INTERVAL);

        assert!(!scheduler.poll(start + Duration::from_millis(50)));
        assert!(scheduler.poll(start + INTERVAL));
        assert!(!scheduler.poll(start + INTERVAL));
        assert!(scheduler.poll(start + INTERVAL * 2));
    }

    #[test]
    fn late_poll_does_not_catch_up() {
        let mut scheduler = TickScheduler::default();
        let start = Instant::now();
        scheduler.start(start, INTERVAL);

        let late = start + INTERVAL * 5;
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.time_until_next(late), Some(INTERVAL));
    }

    #[test]
    fn cancel_stops_pending_tick() {
        let mut scheduler = TickScheduler::default();
        let start = Instant::now();
        scheduler.start(start, INTERVAL);

        scheduler.cancel();

        assert!(!scheduler.is_active());
        assert!(!scheduler.poll(start + INTERVAL * 3));
    }

    #[test]
    fn restart_replaces_previous_deadline() {
        let mut scheduler = TickScheduler::default();
        let start = Instant::now();
        scheduler.start(start, INTERVAL);
        scheduler.start(start + Duration::from_millis(80), Duration::from_millis(70));

        assert!(!scheduler.poll(start + INTERVAL));
        assert!(scheduler.poll(start + Duration::from_millis(150)));
    }
}
