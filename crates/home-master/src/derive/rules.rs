// derive/rules.rs
//
// Compiled-in derivation table: one rule per section, one pure field
// function per numeric parameter. Hue is not in the field table; it is always
// rotated by the section's hue shift.

use crate::core::params::{Param, Params};
use crate::core::section::{Geometry, Section};

/// Pure function from the home record to one derived field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// Copy the home value.
    Same,
    /// `home * factor`
    Scale(f32),
    /// `home * scale + offset`
    Affine { scale: f32, offset: f32 },
    /// `pivot - home`
    Mirror(f32),
    /// `home * scale + home[other] * other_scale`
    Mix { scale: f32, other: Param, other_scale: f32 },
    /// Ignore home and use a constant.
    Fixed(f32),
}

impl FieldRule {
    #[inline]
    pub fn apply(self, param: Param, home: &Params) -> f32 {
        let x = home.get(param);
        match self {
            FieldRule::Same => x,
            FieldRule::Scale(factor) => x * factor,
            FieldRule::Affine { scale, offset } => x * scale + offset,
            FieldRule::Mirror(pivot) => pivot - x,
            FieldRule::Mix { scale, other, other_scale } => x * scale + home.get(other) * other_scale,
            FieldRule::Fixed(value) => value,
        }
    }
}

/// How one section derives its configuration from home.
#[derive(Debug)]
pub struct SectionRule {
    pub section: Section,
    pub geometry: Geometry,
    /// Added to home hue, wrapping around the color wheel.
    pub hue_shift: f32,
    /// Multiplies home scroll direction; its magnitude also scales sensitivity.
    pub direction_multiplier: f32,
    /// Fields not listed here copy the home value.
    pub fields: &'static [(Param, FieldRule)],
}

impl SectionRule {
    pub fn field(&self, param: Param) -> FieldRule {
        self.fields
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, rule)| *rule)
            .unwrap_or(FieldRule::Same)
    }

    /// Hue after rotating by this section's shift, always in [0, 1).
    pub fn shift_hue(&self, hue: f32) -> f32 {
        let wrapped = (hue + self.hue_shift).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for values just below a whole turn.
        if wrapped >= 1.0 { 0.0 } else { wrapped }
    }
}

use FieldRule::*;

pub static RULES: [SectionRule; 6] = [
    SectionRule {
        section: Section::Homepage,
        geometry: Geometry::Hypercube,
        hue_shift: 0.0,
        direction_multiplier: 1.0,
        fields: &[],
    },
    SectionRule {
        section: Section::TechShowcase,
        geometry: Geometry::Tetrahedron,
        hue_shift: 0.33,
        direction_multiplier: -1.0,
        fields: &[
            (Param::GridDensity, Scale(0.7)),
            (Param::MorphFactor, Scale(1.2)),
            (Param::RotationSpeed, Scale(1.5)),
            (Param::GlitchIntensity, Scale(0.5)),
            (Param::LineThickness, Scale(0.8)),
            (Param::PatternIntensity, Scale(1.3)),
            (Param::ColorShift, Affine { scale: 1.0, offset: 0.1 }),
            (Param::Brightness, Scale(0.95)),
        ],
    },
    SectionRule {
        section: Section::MediaGallery,
        geometry: Geometry::Sphere,
        hue_shift: 0.15,
        direction_multiplier: 0.5,
        fields: &[
            (Param::GridDensity, Scale(1.4)),
            (Param::MorphFactor, Scale(0.6)),
            (Param::RotationSpeed, Scale(0.5)),
            (Param::GlitchIntensity, Scale(1.5)),
            (Param::Dimension, Affine { scale: 1.0, offset: 0.3 }),
            (Param::LineThickness, Scale(1.2)),
            (Param::UniverseModifier, Scale(1.2)),
            (Param::ColorShift, Mirror(0.0)),
            (Param::Saturation, Scale(0.9)),
        ],
    },
    SectionRule {
        section: Section::InnovationLab,
        geometry: Geometry::Torus,
        hue_shift: 0.5,
        direction_multiplier: -1.5,
        fields: &[
            (Param::GridDensity, Scale(0.5)),
            (Param::MorphFactor, Mix { scale: 0.8, other: Param::GlitchIntensity, other_scale: 1.0 }),
            (Param::RotationSpeed, Scale(2.0)),
            (Param::GlitchIntensity, Scale(2.0)),
            (Param::Dimension, Fixed(4.0)),
            (Param::LineThickness, Scale(0.6)),
            (Param::PatternIntensity, Scale(1.6)),
            (Param::UniverseModifier, Scale(1.5)),
            (Param::ColorShift, Affine { scale: 1.0, offset: -0.2 }),
            (Param::Brightness, Scale(1.05)),
        ],
    },
    SectionRule {
        section: Section::ResearchArchive,
        geometry: Geometry::Crystal,
        hue_shift: 0.66,
        direction_multiplier: 0.3,
        fields: &[
            (Param::GridDensity, Scale(2.0)),
            (Param::MorphFactor, Scale(0.3)),
            (Param::RotationSpeed, Scale(0.3)),
            (Param::GlitchIntensity, Fixed(0.0)),
            (Param::LineThickness, Scale(1.5)),
            (Param::PatternIntensity, Scale(0.7)),
            (Param::UniverseModifier, Scale(0.8)),
            (Param::ColorShift, Scale(0.5)),
            (Param::Saturation, Scale(0.6)),
            (Param::Brightness, Scale(0.85)),
        ],
    },
    SectionRule {
        section: Section::ContextOverlay,
        geometry: Geometry::KleinBottle,
        hue_shift: 0.83,
        direction_multiplier: -0.5,
        fields: &[
            (Param::MorphFactor, Mirror(1.0)),
            (Param::RotationSpeed, Scale(0.8)),
            (Param::GlitchIntensity, Scale(0.8)),
            (Param::Dimension, Mirror(7.0)),
            (Param::PatternIntensity, Mix { scale: 0.5, other: Param::MorphFactor, other_scale: 0.5 }),
            (Param::Saturation, Scale(0.8)),
            (Param::Brightness, Scale(0.75)),
        ],
    },
];

impl Section {
    /// The fixed derivation rule for this section.
    pub fn rule(self) -> &'static SectionRule {
        &RULES[self.slot()]
    }

    pub fn geometry(self) -> Geometry {
        self.rule().geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_slot() {
        for section in Section::ALL {
            assert_eq!(section.rule().section, section);
        }
    }

    #[test]
    fn no_rule_rewrites_hue() {
        for rule in &RULES {
            assert_eq!(rule.field(Param::Hue), FieldRule::Same, "{}", rule.section);
        }
    }

    #[test]
    fn hue_shift_wraps_around() {
        let rule = Section::TechShowcase.rule();
        let hue = rule.shift_hue(0.9);
        assert!((hue - 0.23).abs() < 1e-5, "got {hue}");
        assert!(rule.shift_hue(0.5) < 1.0);
    }

    #[test]
    fn field_rules_apply() {
        let home = Params::BASELINE;
        assert_eq!(FieldRule::Scale(0.5).apply(Param::GridDensity, &home), 6.0);
        assert_eq!(FieldRule::Mirror(1.0).apply(Param::MorphFactor, &home), 0.5);
        assert_eq!(FieldRule::Fixed(4.0).apply(Param::Dimension, &home), 4.0);
        let mixed = FieldRule::Mix { scale: 1.0, other: Param::GlitchIntensity, other_scale: 2.0 }
            .apply(Param::MorphFactor, &home);
        assert!((mixed - 0.7).abs() < 1e-6);
    }

    #[test]
    fn unlisted_fields_copy_home() {
        assert_eq!(Section::TechShowcase.rule().field(Param::Dimension), FieldRule::Same);
    }
}
