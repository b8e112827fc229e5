use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Holds at most one pending value until it has been left alone for a
/// full window. A newer value replaces the pending one and restarts the
/// window.
#[derive(Debug)]
pub struct Debounce<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) {
        self.push_at(value, Instant::now());
    }

    pub fn push_at(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.window, value));
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending value, if its window has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|at| at <= now) {
            self.cancel()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }
}

/// Sleep until `deadline`, or forever when there is none.
pub async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_last_value_survives() {
        let t0 = Instant::now();
        let mut d = Debounce::new(DEFAULT_WINDOW);
        d.push_at("h", t0);
        d.push_at("ho", t0 + Duration::from_millis(100));
        d.push_at("hou", t0 + Duration::from_millis(200));

        assert_eq!(d.take_due(t0 + Duration::from_millis(400)), None);
        assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(500)));
        assert_eq!(d.take_due(t0 + Duration::from_millis(500)), Some("hou"));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_clears() {
        let mut d = Debounce::new(DEFAULT_WINDOW);
        d.push(1);
        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_until_deadline() {
        let mut d = Debounce::new(DEFAULT_WINDOW);
        let start = Instant::now();
        d.push("query");
        sleep_until(d.deadline()).await;
        assert_eq!(start.elapsed(), DEFAULT_WINDOW);
        assert_eq!(d.take_due(Instant::now()), Some("query"));
    }
}
