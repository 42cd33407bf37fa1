use std::time::{Duration, Instant};

/// Fixed-rate tick schedule with at most one pending deadline.
#[derive(Debug, Default)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Ticker::default()
    }

    /// Arms the ticker to fire `rate` times per second, first at `now + 1/rate`.
    pub fn start(&mut self, rate: f64, now: Instant) {
        self.interval = Duration::from_secs_f64(1.0 / rate);
        self.next = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Drops the pending deadline before arming the new rate.
    pub fn restart(&mut self, rate: f64, now: Instant) {
        self.stop();
        self.start(rate, now);
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next tick; `None` when stopped.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Returns true once per elapsed deadline. A late poll does not queue up missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now >= next => {
                let following = next + self.interval;
                self.next = Some(if following > now { following } else { now + self.interval });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        ticker.start(8.0, t0);

        assert_eq!(ticker.interval(), Duration::from_millis(125));
        assert!(!ticker.poll(t0));
        assert!(!ticker.poll(t0 + Duration::from_millis(124)));
        assert!(ticker.poll(t0 + Duration::from_millis(125)));
        assert!(!ticker.poll(t0 + Duration::from_millis(126)));
        assert!(ticker.poll(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn late_polls_do_not_burst() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        ticker.start(10.0, t0);

        let late = t0 + Duration::from_secs(5);
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.remaining(late), Some(Duration::from_millis(100)));
    }

    #[test]
    fn restart_replaces_the_pending_deadline() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        ticker.start(1.0, t0);

        let t1 = t0 + Duration::from_millis(400);
        ticker.restart(10.0, t1);

        // The old one second deadline is gone; only the new rate fires.
        assert!(!ticker.poll(t1 + Duration::from_millis(99)));
        assert!(ticker.poll(t1 + Duration::from_millis(100)));
        assert_eq!(ticker.remaining(t1 + Duration::from_millis(100)), Some(Duration::from_millis(100)));
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        assert!(!ticker.poll(t0));

        ticker.start(100.0, t0);
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(!ticker.poll(t0 + Duration::from_secs(1)));
        assert_eq!(ticker.remaining(t0), None);
    }
}
