use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive value range for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(self, value: f32) -> f32 {
        // NaN would poison every derived section, so pin it to the lower bound.
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Clamp range for scroll sensitivity, shared by home and overlay code.
pub const SENSITIVITY_RANGE: ParamRange = ParamRange::new(0.0, 3.0);
/// Range `randomize_home` draws scroll sensitivity from.
pub const SENSITIVITY_RANDOM: ParamRange = ParamRange::new(0.5, 1.5);

/// Names every numeric visual parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Param {
    GridDensity,
    MorphFactor,
    RotationSpeed,
    GlitchIntensity,
    Dimension,
    LineThickness,
    PatternIntensity,
    UniverseModifier,
    ColorShift,
    Hue,
    Saturation,
    Brightness,
}

impl Param {
    pub const ALL: [Param; 12] = [
        Param::GridDensity,
        Param::MorphFactor,
        Param::RotationSpeed,
        Param::GlitchIntensity,
        Param::Dimension,
        Param::LineThickness,
        Param::PatternIntensity,
        Param::UniverseModifier,
        Param::ColorShift,
        Param::Hue,
        Param::Saturation,
        Param::Brightness,
    ];

    /// The camelCase name used by the page scripts and preset JSON.
    pub fn name(self) -> &'static str {
        match self {
            Param::GridDensity => "gridDensity",
            Param::MorphFactor => "morphFactor",
            Param::RotationSpeed => "rotationSpeed",
            Param::GlitchIntensity => "glitchIntensity",
            Param::Dimension => "dimension",
            Param::LineThickness => "lineThickness",
            Param::PatternIntensity => "patternIntensity",
            Param::UniverseModifier => "universeModifier",
            Param::ColorShift => "colorShift",
            Param::Hue => "hue",
            Param::Saturation => "saturation",
            Param::Brightness => "brightness",
        }
    }

    /// Range every stored or overlaid value is clamped to.
    pub fn range(self) -> ParamRange {
        match self {
            Param::GridDensity => ParamRange::new(4.0, 100.0),
            Param::MorphFactor => ParamRange::new(0.0, 2.0),
            Param::RotationSpeed => ParamRange::new(0.0, 3.0),
            Param::GlitchIntensity => ParamRange::new(0.0, 1.0),
            Param::Dimension => ParamRange::new(3.0, 5.0),
            Param::LineThickness => ParamRange::new(0.002, 0.1),
            Param::PatternIntensity => ParamRange::new(0.0, 3.0),
            Param::UniverseModifier => ParamRange::new(0.1, 3.0),
            Param::ColorShift => ParamRange::new(-1.0, 1.0),
            Param::Hue => ParamRange::new(0.0, 1.0),
            Param::Saturation => ParamRange::new(0.0, 1.0),
            Param::Brightness => ParamRange::new(0.0, 1.5),
        }
    }

    /// Range a randomized home draws from. Always inside `range()`.
    pub fn random_range(self) -> ParamRange {
        match self {
            Param::GridDensity => ParamRange::new(5.0, 20.0),
            Param::MorphFactor => ParamRange::new(0.0, 1.0),
            Param::RotationSpeed => ParamRange::new(0.1, 1.5),
            Param::GlitchIntensity => ParamRange::new(0.0, 0.3),
            Param::Dimension => ParamRange::new(3.0, 4.0),
            Param::LineThickness => ParamRange::new(0.01, 0.05),
            Param::PatternIntensity => ParamRange::new(0.5, 2.0),
            Param::UniverseModifier => ParamRange::new(0.5, 1.5),
            Param::ColorShift => ParamRange::new(-0.5, 0.5),
            Param::Hue => ParamRange::new(0.0, 1.0),
            Param::Saturation => ParamRange::new(0.6, 1.0),
            Param::Brightness => ParamRange::new(0.7, 1.0),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Param {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Param::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ConfigError::UnknownParameter(s.to_string()))
    }
}

/// The twelve numeric fields of a visual configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub grid_density: f32,
    pub morph_factor: f32,
    pub rotation_speed: f32,
    pub glitch_intensity: f32,
    pub dimension: f32,
    pub line_thickness: f32,
    pub pattern_intensity: f32,
    pub universe_modifier: f32,
    pub color_shift: f32,
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Params {
    /// Baseline that presets are merged over.
    pub const BASELINE: Params = Params {
        grid_density: 12.0,
        morph_factor: 0.5,
        rotation_speed: 0.5,
        glitch_intensity: 0.1,
        dimension: 3.5,
        line_thickness: 0.03,
        pattern_intensity: 1.0,
        universe_modifier: 1.0,
        color_shift: 0.0,
        hue: 0.55,
        saturation: 0.8,
        brightness: 0.9,
    };

    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::GridDensity => self.grid_density,
            Param::MorphFactor => self.morph_factor,
            Param::RotationSpeed => self.rotation_speed,
            Param::GlitchIntensity => self.glitch_intensity,
            Param::Dimension => self.dimension,
            Param::LineThickness => self.line_thickness,
            Param::PatternIntensity => self.pattern_intensity,
            Param::UniverseModifier => self.universe_modifier,
            Param::ColorShift => self.color_shift,
            Param::Hue => self.hue,
            Param::Saturation => self.saturation,
            Param::Brightness => self.brightness,
        }
    }

    pub fn set(&mut self, param: Param, value: f32) {
        let slot = match param {
            Param::GridDensity => &mut self.grid_density,
            Param::MorphFactor => &mut self.morph_factor,
            Param::RotationSpeed => &mut self.rotation_speed,
            Param::GlitchIntensity => &mut self.glitch_intensity,
            Param::Dimension => &mut self.dimension,
            Param::LineThickness => &mut self.line_thickness,
            Param::PatternIntensity => &mut self.pattern_intensity,
            Param::UniverseModifier => &mut self.universe_modifier,
            Param::ColorShift => &mut self.color_shift,
            Param::Hue => &mut self.hue,
            Param::Saturation => &mut self.saturation,
            Param::Brightness => &mut self.brightness,
        };
        *slot = value;
    }

    /// Set a field after clamping it to the field's range. Returns the stored value.
    pub fn set_clamped(&mut self, param: Param, value: f32) -> f32 {
        let clamped = param.range().clamp(value);
        self.set(param, clamped);
        clamped
    }

    /// Build a record field by field.
    pub fn from_fn(mut f: impl FnMut(Param) -> f32) -> Self {
        let mut params = Params::BASELINE;
        for param in Param::ALL {
            params.set(param, f(param));
        }
        params
    }

    /// Combine two records field by field.
    pub fn zip_with(&self, other: &Params, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Params::from_fn(|p| f(self.get(p), other.get(p)))
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::BASELINE
    }
}
