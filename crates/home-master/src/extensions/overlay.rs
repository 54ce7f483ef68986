use crate::core::config::VisualConfig;

/// Per-frame scroll overlay. Returns a modified copy; `config` is never touched.
///
/// Each field in the configuration's scroll-reactive subset gets
/// `velocity * sensitivity * direction` added and is clamped back into its range.
/// The clamp runs at rest too, so derived values past a field's range never
/// reach the renderer. Non-finite velocity counts as zero.
pub fn scroll_overlay(config: &VisualConfig, velocity: f32) -> VisualConfig {
    let mut frame = config.clone();
    let velocity = if velocity.is_finite() { velocity } else { 0.0 };
    let delta = velocity * config.scroll.sensitivity * config.scroll.direction;
    for &param in &config.scroll.fields {
        frame.params.set_clamped(param, config.params.get(param) + delta);
    }
    frame
}
