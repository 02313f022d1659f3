//! Time-driven camera placement along a closed path.
//!
//! The follower is a pure function of elapsed wall-clock time: it keeps no
//! state between frames, so the same `t_ms` always yields the same pose.

use glam::Vec3;

use crate::error::WormholeError;
use crate::path::PathProvider;

/// Speed and look-ahead settings for [`CameraPathFollower`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerConfig {
    /// Multiplier applied to elapsed milliseconds.
    pub speed_factor: f64,
    /// Scaled milliseconds per traversal of the loop.
    pub loop_duration_ms: f64,
    /// Path fraction between the camera and its look-at target.
    pub look_ahead: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            speed_factor: 0.3,
            loop_duration_ms: 20_000.0,
            look_ahead: 0.01,
        }
    }
}

impl FollowerConfig {
    /// Reject values that would make the path parameter undefined.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::InvalidOptions`] if `loop_duration_ms` is not
    /// a positive finite number, `speed_factor` is negative or non-finite, or
    /// `look_ahead` is outside `(0, 1)`.
    pub fn validate(&self) -> Result<(), WormholeError> {
        if !(self.loop_duration_ms.is_finite() && self.loop_duration_ms > 0.0)
        {
            return Err(WormholeError::InvalidOptions(format!(
                "flight.loop_duration_ms must be positive, got {}",
                self.loop_duration_ms
            )));
        }
        if !(self.speed_factor.is_finite() && self.speed_factor >= 0.0) {
            return Err(WormholeError::InvalidOptions(format!(
                "flight.speed_factor must be >= 0, got {}",
                self.speed_factor
            )));
        }
        if !(self.look_ahead > 0.0 && self.look_ahead < 1.0) {
            return Err(WormholeError::InvalidOptions(format!(
                "flight.look_ahead must be in (0, 1), got {}",
                self.look_ahead
            )));
        }
        Ok(())
    }
}

/// Where the camera sits and what it looks at for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position on the path.
    pub position: Vec3,
    /// Point slightly further along the path.
    pub look_at: Vec3,
    /// Normalized path parameter of `position`, in `[0, 1)`.
    pub phase: f32,
}

/// Maps elapsed time to a [`CameraPose`] on a closed path.
#[derive(Debug, Clone, Copy)]
pub struct CameraPathFollower {
    config: FollowerConfig,
}

impl CameraPathFollower {
    /// Create a follower after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::InvalidOptions`] if the config is rejected by
    /// [`FollowerConfig::validate`].
    pub fn new(config: FollowerConfig) -> Result<Self, WormholeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    /// Path parameter for elapsed time `t_ms`, always in `[0, 1)`.
    ///
    /// Negative or non-finite times are treated as zero.
    #[must_use]
    pub fn phase(&self, t_ms: f64) -> f32 {
        let t = if t_ms.is_finite() && t_ms > 0.0 {
            t_ms
        } else {
            0.0
        };
        let scaled = t * self.config.speed_factor;
        if !scaled.is_finite() {
            return 0.0;
        }
        let loop_ms = self.config.loop_duration_ms;
        let p = (scaled.rem_euclid(loop_ms) / loop_ms) as f32;
        // Values just below 1.0 in f64 can round up when narrowed.
        if p >= 1.0 {
            0.0
        } else {
            p
        }
    }

    /// Camera pose on `path` at elapsed time `t_ms`.
    #[must_use]
    pub fn pose<P: PathProvider + ?Sized>(
        &self,
        path: &P,
        t_ms: f64,
    ) -> CameraPose {
        let phase = self.phase(t_ms);
        let ahead = (phase + self.config.look_ahead).rem_euclid(1.0);
        CameraPose {
            position: path.point_at(phase),
            look_at: path.point_at(ahead),
            phase,
        }
    }

    /// Wall-clock milliseconds for one full loop, or `None` when the camera
    /// is stationary.
    #[must_use]
    pub fn period_ms(&self) -> Option<f64> {
        (self.config.speed_factor > 0.0)
            .then(|| self.config.loop_duration_ms / self.config.speed_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::wormhole_path;

    /// Unit circle in the XZ plane; `point_at(u)` is exactly
    /// arc-length parameterized.
    struct Circle;

    impl PathProvider for Circle {
        fn point(&self, t: f32) -> Vec3 {
            let a = t * std::f32::consts::TAU;
            Vec3::new(a.cos(), 0.0, a.sin())
        }

        fn point_at(&self, u: f32) -> Vec3 {
            self.point(u)
        }

        fn is_closed(&self) -> bool {
            true
        }
    }

    fn follower(speed_factor: f64, loop_duration_ms: f64) -> CameraPathFollower {
        CameraPathFollower::new(FollowerConfig {
            speed_factor,
            loop_duration_ms,
            ..FollowerConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn defaults_match_the_flythrough() {
        let config = FollowerConfig::default();
        assert_eq!(config.speed_factor, 0.3);
        assert_eq!(config.loop_duration_ms, 20_000.0);
        assert_eq!(config.look_ahead, 0.01);
        config.validate().unwrap();
    }

    #[test]
    fn phase_stays_in_unit_interval() {
        let f = follower(0.3, 20_000.0);
        let mut t = 0.0;
        while t < 500_000.0 {
            let p = f.phase(t);
            assert!((0.0..1.0).contains(&p), "p = {p} at t = {t}");
            t += 137.31;
        }
        // Just below a full loop rounds to 1.0 in f32 and must wrap.
        let almost = 20_000.0 / 0.3 - 1e-7;
        assert!(f.phase(almost) < 1.0);
    }

    #[test]
    fn start_and_half_loop() {
        let f = follower(0.3, 20_000.0);
        assert_eq!(f.config(), &FollowerConfig::default());
        assert_eq!(f.phase(0.0), 0.0);

        let start = f.pose(&Circle, 0.0);
        assert!(start.position.distance(Circle.point_at(0.0)) < 1e-6);
        assert!(start.look_at.distance(Circle.point_at(0.01)) < 1e-6);

        let lap = f.pose(&Circle, 20_000.0 / 0.3);
        assert!(lap.position.distance(start.position) < 1e-4);
        assert!(lap.look_at.distance(start.look_at) < 1e-4);

        let half = f.phase(33_333.0);
        assert!((half - 0.5).abs() < 1e-4, "half = {half}");

        let full = f.phase(66_667.0);
        assert!(full < 1e-4 || full > 1.0 - 1e-4, "full = {full}");
    }

    #[test]
    fn pose_is_periodic() {
        // 0.5 and 20000 give an exactly representable period.
        let f = follower(0.5, 20_000.0);
        let period = f.period_ms().unwrap();
        assert_eq!(period, 40_000.0);
        for t in [0.0, 1_234.5, 17_000.25, 39_999.0] {
            assert_eq!(f.pose(&Circle, t), f.pose(&Circle, t + period));
        }

        let f = follower(0.3, 20_000.0);
        let period = f.period_ms().unwrap();
        for t in [10.0, 5_000.0, 60_000.0] {
            let a = f.pose(&Circle, t);
            let b = f.pose(&Circle, t + period);
            assert!(a.position.distance(b.position) < 1e-3);
        }
    }

    #[test]
    fn look_at_is_one_percent_ahead() {
        let f = follower(0.3, 20_000.0);
        let pose = f.pose(&Circle, 33_333.0);
        let expected = Circle.point_at((pose.phase + 0.01) % 1.0);
        assert!(pose.look_at.distance(expected) < 1e-6);
        assert!(pose.look_at.distance(Circle.point_at(0.51)) < 1e-3);
    }

    #[test]
    fn look_at_wraps_past_the_seam() {
        let f = follower(1.0, 1_000.0);
        let pose = f.pose(&Circle, 995.0);
        assert!((pose.phase - 0.995).abs() < 1e-6);
        assert!(pose.look_at.distance(Circle.point_at(0.005)) < 1e-5);
    }

    #[test]
    fn bad_times_clamp_to_start() {
        let f = follower(0.3, 20_000.0);
        assert_eq!(f.phase(-50.0), 0.0);
        assert_eq!(f.phase(f64::NAN), 0.0);
        assert_eq!(f.phase(f64::INFINITY), 0.0);
    }

    #[test]
    fn zero_speed_parks_the_camera() {
        let f = follower(0.0, 20_000.0);
        assert_eq!(f.period_ms(), None);
        assert_eq!(f.phase(123_456.0), 0.0);
    }

    #[test]
    fn validate_rejects_unusable_configs() {
        let bad = [
            FollowerConfig {
                loop_duration_ms: 0.0,
                ..FollowerConfig::default()
            },
            FollowerConfig {
                loop_duration_ms: f64::INFINITY,
                ..FollowerConfig::default()
            },
            FollowerConfig {
                speed_factor: -0.1,
                ..FollowerConfig::default()
            },
            FollowerConfig {
                speed_factor: f64::NAN,
                ..FollowerConfig::default()
            },
            FollowerConfig {
                look_ahead: 0.0,
                ..FollowerConfig::default()
            },
            FollowerConfig {
                look_ahead: 1.0,
                ..FollowerConfig::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(
                    CameraPathFollower::new(config),
                    Err(WormholeError::InvalidOptions(_))
                ),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn follows_the_wormhole_seam_smoothly() {
        let path = wormhole_path().unwrap();
        let f = follower(0.3, 20_000.0);
        let period = f.period_ms().unwrap();
        let before = f.pose(&path, period - 1.0);
        let after = f.pose(&path, period + 1.0);
        assert!(before.position.distance(after.position) < 0.05);
    }
}
