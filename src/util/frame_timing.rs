use web_time::{Duration, Instant};

/// How often the smoothed FPS is written to the debug log.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Frame timing with FPS calculation and periodic reporting
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time the FPS was reported
    last_report: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames rendered since the last report
    frames_since_report: u32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            last_report: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
            frames_since_report: 0,
        }
    }

    /// Call after rendering to update timing. Logs the FPS at debug level
    /// about once per second.
    pub fn end_frame(&mut self) {
        if let Some((fps, frames)) = self.end_frame_at(Instant::now()) {
            log::debug!("{fps:.1} fps ({frames} frames since last report)");
        }
    }

    /// Record a frame ending at `now`. Returns the smoothed FPS and the
    /// frame count since the previous report when a report is due.
    fn end_frame_at(&mut self, now: Instant) -> Option<(f32, u32)> {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames_since_report += 1;

        // Calculate instantaneous FPS
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        if now.saturating_duration_since(self.last_report) >= REPORT_INTERVAL {
            self.last_report = now;
            let frames = std::mem::take(&mut self.frames_since_report);
            Some((self.smoothed_fps, frames))
        } else {
            None
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
