use web_time::{Duration, Instant};

/// Wall clock for the fly-through that can be paused.
///
/// Elapsed time excludes paused intervals, so it never decreases and the
/// camera resumes exactly where it stopped.
#[derive(Debug, Clone)]
pub struct FlightClock {
    started: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl Default for FlightClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightClock {
    /// Start a running clock now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            started: now,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Milliseconds of unpaused time since the clock started.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms_at(Instant::now())
    }

    fn elapsed_ms_at(&self, now: Instant) -> f64 {
        let end = self.paused_at.unwrap_or(now);
        let running = end
            .saturating_duration_since(self.started)
            .saturating_sub(self.paused_total);
        running.as_secs_f64() * 1000.0
    }

    /// Whether time is currently frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Pause if running, resume if paused. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.toggle_pause_at(Instant::now())
    }

    fn toggle_pause_at(&mut self, now: Instant) -> bool {
        match self.paused_at.take() {
            Some(paused_at) => {
                self.paused_total += now.saturating_duration_since(paused_at);
                false
            }
            None => {
                self.paused_at = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn runs_with_wall_time() {
        let start = Instant::now();
        let clock = FlightClock::starting_at(start);
        assert_eq!(clock.elapsed_ms_at(start), 0.0);
        assert!((clock.elapsed_ms_at(start + ms(1500)) - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let start = Instant::now();
        let mut clock = FlightClock::starting_at(start);

        assert!(clock.toggle_pause_at(start + ms(1000)));
        assert!(clock.is_paused());
        assert!((clock.elapsed_ms_at(start + ms(5000)) - 1000.0).abs() < 1e-6);

        assert!(!clock.toggle_pause_at(start + ms(3000)));
        assert!(!clock.is_paused());
        assert!((clock.elapsed_ms_at(start + ms(3500)) - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn elapsed_never_decreases() {
        let start = Instant::now();
        let mut clock = FlightClock::starting_at(start);
        let mut last = 0.0;
        for step in 1..=40u64 {
            let now = start + ms(step * 50);
            if step % 7 == 0 {
                let _ = clock.toggle_pause_at(now);
            }
            let t = clock.elapsed_ms_at(now);
            assert!(t >= last, "went back from {last} to {t}");
            last = t;
        }
    }
}
