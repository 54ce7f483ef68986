use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::combinations::{self, Resolution};
use crate::core::config::{ScrollReactivity, VisualConfig};
use crate::core::params::{Param, Params};
use crate::core::section::Section;
use crate::error::ConfigError;

/// A named bundle of overrides, merged over `Params::BASELINE` when loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub values: Vec<(Param, f32)>,
    /// Scroll combination key. `None` keeps the default combination.
    pub scroll: Option<String>,
    pub scroll_direction: f32,
    pub scroll_sensitivity: f32,
}

impl Preset {
    pub fn new(values: &[(Param, f32)]) -> Self {
        Self {
            values: values.to_vec(),
            scroll: None,
            scroll_direction: 1.0,
            scroll_sensitivity: 1.0,
        }
    }

    pub fn with_scroll(mut self, combination: &str) -> Self {
        self.scroll = Some(combination.to_string());
        self
    }

    pub fn with_scroll_direction(mut self, direction: f32) -> Self {
        self.scroll_direction = direction;
        self
    }

    pub fn with_scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.scroll_sensitivity = sensitivity;
        self
    }

    /// Parse a preset from JSON: camelCase parameter names mapped to numbers,
    /// plus optional `scroll`, `scrollDirection` and `scrollSensitivity`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let def: PresetDef = serde_json::from_str(json)?;
        let values = def
            .values
            .into_iter()
            .map(|(name, value)| Ok((name.parse::<Param>()?, value)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            values,
            scroll: def.scroll,
            scroll_direction: def.scroll_direction.unwrap_or(1.0),
            scroll_sensitivity: def.scroll_sensitivity.unwrap_or(1.0),
        })
    }

    /// Merge this preset over the baseline into a full home record.
    pub fn to_home(&self) -> VisualConfig {
        let mut params = Params::BASELINE;
        for &(param, value) in &self.values {
            params.set_clamped(param, value);
        }

        let requested = self.scroll.as_deref().unwrap_or(combinations::DEFAULT_COMBINATION);
        let ((key, fields), resolution) = combinations::resolve(requested);
        if resolution == Resolution::FellBack {
            log::warn!("preset scroll combination '{}' unknown, using '{}'", requested, key);
        }

        VisualConfig {
            geometry: Section::Homepage.geometry(),
            params,
            scroll: ScrollReactivity::new(self.scroll_direction, self.scroll_sensitivity, key, fields),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresetDef {
    #[serde(default)]
    scroll: Option<String>,
    #[serde(default)]
    scroll_direction: Option<f32>,
    #[serde(default)]
    scroll_sensitivity: Option<f32>,
    #[serde(flatten)]
    values: BTreeMap<String, f32>,
}

/// Names of the compiled-in presets.
pub const BUILTIN_PRESETS: [&str; 4] = ["cyberpunk", "minimal", "chaotic", "elegant"];

pub fn builtin(name: &str) -> Option<Preset> {
    let preset = match name {
        "cyberpunk" => Preset::new(&[
            (Param::GridDensity, 18.0),
            (Param::MorphFactor, 0.8),
            (Param::RotationSpeed, 1.2),
            (Param::GlitchIntensity, 0.4),
            (Param::Dimension, 3.8),
            (Param::LineThickness, 0.02),
            (Param::PatternIntensity, 1.8),
            (Param::ColorShift, 0.3),
            (Param::Hue, 0.83),
            (Param::Saturation, 1.0),
            (Param::Brightness, 1.1),
        ])
        .with_scroll("rotation-glitch")
        .with_scroll_sensitivity(1.4),
        "minimal" => Preset::new(&[
            (Param::GridDensity, 6.0),
            (Param::MorphFactor, 0.1),
            (Param::RotationSpeed, 0.2),
            (Param::GlitchIntensity, 0.0),
            (Param::Dimension, 3.0),
            (Param::LineThickness, 0.01),
            (Param::PatternIntensity, 0.6),
            (Param::Saturation, 0.3),
            (Param::Brightness, 0.8),
        ])
        .with_scroll("minimal")
        .with_scroll_sensitivity(0.5),
        "chaotic" => Preset::new(&[
            (Param::GridDensity, 25.0),
            (Param::MorphFactor, 1.6),
            (Param::RotationSpeed, 2.5),
            (Param::GlitchIntensity, 0.9),
            (Param::Dimension, 4.8),
            (Param::PatternIntensity, 2.6),
            (Param::UniverseModifier, 2.2),
            (Param::ColorShift, -0.7),
            (Param::Hue, 0.05),
        ])
        .with_scroll("full-spectrum")
        .with_scroll_direction(-1.0)
        .with_scroll_sensitivity(2.0),
        "elegant" => Preset::new(&[
            (Param::GridDensity, 10.0),
            (Param::MorphFactor, 0.35),
            (Param::RotationSpeed, 0.3),
            (Param::GlitchIntensity, 0.02),
            (Param::Dimension, 3.4),
            (Param::LineThickness, 0.015),
            (Param::PatternIntensity, 0.9),
            (Param::Hue, 0.58),
            (Param::Saturation, 0.55),
            (Param::Brightness, 0.95),
        ])
        .with_scroll("color-flow")
        .with_scroll_sensitivity(0.8),
        _ => return None,
    };
    Some(preset)
}

/// Built-in presets plus any registered at runtime. Runtime entries shadow built-ins.
#[derive(Debug, Default)]
pub struct PresetCatalog {
    custom: HashMap<String, Preset>,
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Preset> {
        self.custom.get(name).cloned().or_else(|| builtin(name))
    }

    pub fn register(&mut self, name: &str, preset: Preset) {
        if self.custom.insert(name.to_string(), preset).is_some() || builtin(name).is_some() {
            log::info!("preset '{}' replaced", name);
        }
    }

    /// Every preset name, built-ins first.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_PRESETS.iter().map(|s| s.to_string()).collect();
        let mut custom: Vec<&String> = self.custom.keys().filter(|k| builtin(k).is_none()).collect();
        custom.sort();
        names.extend(custom.into_iter().cloned());
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_resolve() {
        for name in BUILTIN_PRESETS {
            assert!(builtin(name).is_some(), "{name}");
        }
        assert!(builtin("vaporwave").is_none());
    }

    #[test]
    fn preset_merges_over_baseline_and_clamps() {
        let home = builtin("chaotic").unwrap().to_home();
        assert_eq!(home.params.grid_density, 25.0);
        // not overridden by the preset
        assert_eq!(home.params.saturation, Params::BASELINE.saturation);
        assert_eq!(home.scroll.direction, -1.0);
        assert_eq!(home.scroll.combination, "full-spectrum");

        let loud = Preset::new(&[(Param::GlitchIntensity, 7.0)]).to_home();
        assert_eq!(loud.params.glitch_intensity, 1.0);
    }

    #[test]
    fn parses_json_preset() {
        let preset = Preset::from_json(
            r#"{ "gridDensity": 14, "hue": 0.2, "scroll": "color-flow", "scrollDirection": -1 }"#,
        )
        .unwrap();
        let home = preset.to_home();
        assert_eq!(home.params.grid_density, 14.0);
        assert_eq!(home.params.hue, 0.2);
        assert_eq!(home.scroll.combination, "color-flow");
        assert_eq!(home.scroll.direction, -1.0);
    }

    #[test]
    fn json_with_unknown_field_is_rejected() {
        let err = Preset::from_json(r#"{ "sparkle": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParameter(name) if name == "sparkle"));

        let err = Preset::from_json(r#"{ "gridDensity": "dense" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPreset(_)));
    }

    #[test]
    fn custom_presets_shadow_and_list() {
        let mut catalog = PresetCatalog::new();
        catalog.register("minimal", Preset::new(&[(Param::GridDensity, 40.0)]));
        catalog.register("aurora", Preset::new(&[(Param::Hue, 0.4)]));
        assert_eq!(catalog.get("minimal").unwrap().values, vec![(Param::GridDensity, 40.0)]);
        assert_eq!(catalog.names(), vec!["cyberpunk", "minimal", "chaotic", "elegant", "aurora"]);
    }
}
