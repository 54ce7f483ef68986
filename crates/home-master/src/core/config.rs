use serde::{Deserialize, Serialize};

use super::params::{Param, Params, SENSITIVITY_RANGE};
use super::section::Geometry;

/// How a configuration reacts to scroll velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollReactivity {
    /// Sign applied to the velocity. +1 or -1 on the home record; sections
    /// multiply it by their own direction multiplier.
    pub direction: f32,
    pub sensitivity: f32,
    /// Fields that move with scroll.
    pub fields: Vec<Param>,
    /// Catalog key the field subset came from.
    pub combination: String,
}

impl ScrollReactivity {
    pub fn new(direction: f32, sensitivity: f32, combination: &str, fields: &[Param]) -> Self {
        Self {
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            sensitivity: SENSITIVITY_RANGE.clamp(sensitivity),
            fields: fields.to_vec(),
            combination: combination.to_string(),
        }
    }

    pub fn reacts_to(&self, param: Param) -> bool {
        self.fields.contains(&param)
    }
}

/// A complete visual configuration: the home record or one section's derived record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualConfig {
    pub geometry: Geometry,
    #[serde(flatten)]
    pub params: Params,
    pub scroll: ScrollReactivity,
}

impl VisualConfig {
    pub fn get(&self, param: Param) -> f32 {
        self.params.get(param)
    }
}
