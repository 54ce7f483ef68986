use serde::{Deserialize, Serialize};

use crate::extensions::easing::Easing;
use crate::extensions::tracker::ScrollTrackerConfig;

/// Startup configuration for a page's visualizer system.
/// Loaded from a JSON object embedded in the page; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemConfig {
    /// Seed for home randomization. `None` lets the host pick one.
    pub seed: Option<u64>,
    /// Preset to load at startup instead of randomizing.
    pub initial_preset: Option<String>,
    /// Scroll combination applied after the initial home is created.
    pub initial_scroll: Option<String>,
    /// Section whose visualizer is in view at startup.
    pub active_section: String,
    /// Seconds a section or home change takes to blend in.
    pub transition_seconds: f32,
    pub transition_easing: Easing,
    pub scroll: ScrollTrackerConfig,
    /// `log` level name for the browser console.
    pub log_level: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_preset: None,
            initial_scroll: None,
            active_section: "homepage".to_string(),
            transition_seconds: 0.8,
            transition_easing: Easing::CubicInOut,
            scroll: ScrollTrackerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SystemConfig {
    /// Parse from JSON. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }

    /// `log_level` as a filter, defaulting to Info for unrecognized names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
