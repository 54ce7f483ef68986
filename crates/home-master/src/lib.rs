pub mod config;
pub mod core;
pub mod derive;
pub mod error;
pub mod extensions;
pub mod renderer;
pub mod store;

// Re-export key types at crate root for convenience
pub use config::SystemConfig;
pub use crate::core::config::{ScrollReactivity, VisualConfig};
pub use crate::core::params::{Param, ParamRange, Params, SENSITIVITY_RANGE};
pub use crate::core::rng::Rng;
pub use crate::core::section::{Geometry, Section};
pub use derive::{derive_section, ConfigBundle, FieldRule, SectionRule, RULES};
pub use error::ConfigError;
pub use renderer::{hsb_to_rgb, SectionUniforms, UniformBuffer};
pub use store::{HomeMaster, Preset, PresetCatalog, Resolution, BUILTIN_PRESETS, COMBINATIONS, DEFAULT_COMBINATION};

// Extensions: per-frame helpers for the render loop
pub use extensions::{
    interpolate, lerp, scroll_overlay,
    Easing, ScrollTracker, ScrollTrackerConfig, Transition,
};
