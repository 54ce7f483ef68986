use crate::core::params::Param;

/// Key used when a requested combination is not in the catalog.
pub const DEFAULT_COMBINATION: &str = "density-morph";

/// Fixed catalog of scroll-reactive field subsets.
pub static COMBINATIONS: &[(&str, &[Param])] = &[
    ("density-morph", &[Param::GridDensity, Param::MorphFactor]),
    ("rotation-glitch", &[Param::RotationSpeed, Param::GlitchIntensity]),
    ("color-flow", &[Param::Hue, Param::ColorShift]),
    ("dimension-shift", &[Param::Dimension, Param::UniverseModifier]),
    ("pattern-pulse", &[Param::PatternIntensity, Param::LineThickness, Param::Brightness]),
    (
        "full-spectrum",
        &[
            Param::GridDensity,
            Param::MorphFactor,
            Param::RotationSpeed,
            Param::GlitchIntensity,
            Param::PatternIntensity,
        ],
    ),
    ("minimal", &[Param::RotationSpeed]),
];

/// Whether a lookup hit the catalog or fell back to the default entry.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched,
    FellBack,
}

pub fn lookup(key: &str) -> Option<(&'static str, &'static [Param])> {
    COMBINATIONS.iter().find(|(k, _)| *k == key).copied()
}

/// Look up `key`, falling back to the default combination.
pub fn resolve(key: &str) -> ((&'static str, &'static [Param]), Resolution) {
    match lookup(key) {
        Some(found) => (found, Resolution::Matched),
        None => (default_combination(), Resolution::FellBack),
    }
}

pub fn default_combination() -> (&'static str, &'static [Param]) {
    COMBINATIONS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_entry() {
        assert_eq!(default_combination().0, DEFAULT_COMBINATION);
    }

    #[test]
    fn unknown_key_falls_back() {
        let ((key, fields), resolution) = resolve("sideways");
        assert_eq!(resolution, Resolution::FellBack);
        assert_eq!(key, DEFAULT_COMBINATION);
        assert_eq!(fields, &[Param::GridDensity, Param::MorphFactor]);
    }

    #[test]
    fn known_key_matches() {
        let ((key, _), resolution) = resolve("color-flow");
        assert_eq!(resolution, Resolution::Matched);
        assert_eq!(key, "color-flow");
    }
}
