// extensions/interpolate.rs
//
// Configuration interpolation and timed transitions between configurations.
//
// Usage:
//   let mut transition = Transition::new(current, target, 0.8, Easing::CubicInOut);
//   transition.advance(dt);               // once per frame, any dt
//   let frame = transition.current();     // config to render this frame
//   transition.retarget(new_target);      // restarts from the current frame

use super::easing::{lerp, Easing};
use crate::core::config::{ScrollReactivity, VisualConfig};

/// Blend two configurations.
///
/// Numeric fields (every parameter plus scroll sensitivity) are interpolated.
/// Geometry, scroll direction and the scroll field subset stay at `start`'s
/// values until progress reaches 1, then switch to `end`'s.
pub fn interpolate(start: &VisualConfig, end: &VisualConfig, progress: f32) -> VisualConfig {
    let t = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    if t >= 1.0 {
        return end.clone();
    }
    if t <= 0.0 {
        return start.clone();
    }

    VisualConfig {
        geometry: start.geometry,
        params: start.params.zip_with(&end.params, |a, b| lerp(a, b, t)),
        scroll: ScrollReactivity {
            direction: start.scroll.direction,
            sensitivity: lerp(start.scroll.sensitivity, end.scroll.sensitivity, t),
            fields: start.scroll.fields.clone(),
            combination: start.scroll.combination.clone(),
        },
    }
}

/// A timed, eased move from one configuration to another.
#[derive(Debug, Clone)]
pub struct Transition {
    from: VisualConfig,
    to: VisualConfig,
    /// Seconds since the transition started.
    elapsed: f32,
    /// Seconds. Zero or negative means jump straight to `to`.
    duration: f32,
    easing: Easing,
}

impl Transition {
    pub fn new(from: VisualConfig, to: VisualConfig, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
            easing,
        }
    }

    /// A finished transition resting on `config`.
    pub fn settled(config: VisualConfig) -> Self {
        Self::new(config.clone(), config, 0.0, Easing::Linear)
    }

    /// Advance by a frame delta. Negative or non-finite deltas are ignored;
    /// long gaps simply land on the target.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// The configuration for the current instant.
    pub fn current(&self) -> VisualConfig {
        interpolate(&self.from, &self.to, self.easing.apply(self.progress()))
    }

    pub fn target(&self) -> &VisualConfig {
        &self.to
    }

    /// Head for a new target, starting from wherever this transition is now.
    /// Supersedes the in-flight transition; elapsed time resets.
    pub fn retarget(&mut self, to: VisualConfig) {
        self.from = self.current();
        self.to = to;
        self.elapsed = 0.0;
    }

    /// Like `retarget`, also replacing duration and easing.
    pub fn retarget_with(&mut self, to: VisualConfig, duration: f32, easing: Easing) {
        self.retarget(to);
        self.duration = duration;
        self.easing = easing;
    }
}
