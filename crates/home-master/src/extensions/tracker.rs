use serde::{Deserialize, Serialize};

/// Tuning for `ScrollTracker`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollTrackerConfig {
    /// Pixels per second that count as velocity 1.0.
    pub velocity_scale: f32,
    /// Weight of the newest sample in the running average, in (0, 1].
    pub smoothing: f32,
    /// Fraction of velocity lost per second while the page is still.
    pub decay_per_second: f32,
    /// Velocity magnitude cap.
    pub max_velocity: f32,
}

impl Default for ScrollTrackerConfig {
    fn default() -> Self {
        Self {
            velocity_scale: 2000.0,
            smoothing: 0.3,
            decay_per_second: 0.9,
            max_velocity: 1.0,
        }
    }
}

/// Turns per-frame scroll positions into a smoothed, normalized velocity.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    config: ScrollTrackerConfig,
    last: Option<(f32, f64)>,
    velocity: f32,
}

impl ScrollTracker {
    pub fn new(config: ScrollTrackerConfig) -> Self {
        Self {
            config,
            last: None,
            velocity: 0.0,
        }
    }

    /// Feed a scroll offset in pixels at time `now` in seconds. Returns the velocity.
    ///
    /// Samples that do not move time forward are dropped. A long gap between
    /// samples is treated as a single step, with no catch-up.
    pub fn sample(&mut self, position: f32, now: f64) -> f32 {
        let Some((last_pos, last_time)) = self.last else {
            self.last = Some((position, now));
            return self.velocity;
        };
        let dt = (now - last_time) as f32;
        if !(dt > 0.0) || !position.is_finite() {
            return self.velocity;
        }
        self.last = Some((position, now));

        let moved = position - last_pos;
        let max = self.config.max_velocity;
        if moved == 0.0 {
            let keep = (1.0 - self.config.decay_per_second.clamp(0.0, 1.0)).powf(dt);
            self.velocity *= keep;
            if self.velocity.abs() < 1e-4 {
                self.velocity = 0.0;
            }
        } else {
            let raw = (moved / dt / self.config.velocity_scale).clamp(-max, max);
            let w = self.config.smoothing.clamp(f32::EPSILON, 1.0);
            self.velocity = (self.velocity + (raw - self.velocity) * w).clamp(-max, max);
        }
        self.velocity
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.velocity = 0.0;
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(ScrollTrackerConfig::default())
    }
}
