use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Primitive shape a section's visualizer renders.
/// Brand identity: fixed per section, never derived from parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Geometry {
    Hypercube,
    Tetrahedron,
    Sphere,
    Torus,
    KleinBottle,
    Fractal,
    Wave,
    Crystal,
}

impl Geometry {
    /// Index passed to the shaders as a float uniform.
    pub fn index(self) -> u32 {
        match self {
            Geometry::Hypercube => 0,
            Geometry::Tetrahedron => 1,
            Geometry::Sphere => 2,
            Geometry::Torus => 3,
            Geometry::KleinBottle => 4,
            Geometry::Fractal => 5,
            Geometry::Wave => 6,
            Geometry::Crystal => 7,
        }
    }
}

/// A page section that owns one visualizer canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// The root section. Its configuration is the home configuration itself.
    Homepage,
    TechShowcase,
    MediaGallery,
    InnovationLab,
    ResearchArchive,
    ContextOverlay,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Homepage,
        Section::TechShowcase,
        Section::MediaGallery,
        Section::InnovationLab,
        Section::ResearchArchive,
        Section::ContextOverlay,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Homepage => "homepage",
            Section::TechShowcase => "tech-showcase",
            Section::MediaGallery => "media-gallery",
            Section::InnovationLab => "innovation-lab",
            Section::ResearchArchive => "research-archive",
            Section::ContextOverlay => "context-overlay",
        }
    }

    /// DOM id of the canvas this section renders into.
    pub fn target_id(self) -> &'static str {
        match self {
            Section::Homepage => "homepage-canvas",
            Section::TechShowcase => "tech-showcase-canvas",
            Section::MediaGallery => "media-gallery-canvas",
            Section::InnovationLab => "innovation-lab-canvas",
            Section::ResearchArchive => "research-archive-canvas",
            Section::ContextOverlay => "context-overlay-canvas",
        }
    }

    /// Match a canvas id back to its section.
    pub fn from_target_id(target: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.target_id() == target)
    }

    /// Position in `Section::ALL`, used as the uniform buffer slot.
    pub fn slot(self) -> usize {
        match self {
            Section::Homepage => 0,
            Section::TechShowcase => 1,
            Section::MediaGallery => 2,
            Section::InnovationLab => 3,
            Section::ResearchArchive => 4,
            Section::ContextOverlay => 5,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = ConfigError;

    /// Accepts either the section id or its canvas id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .or_else(|| Section::from_target_id(s))
            .ok_or_else(|| ConfigError::UnknownSection(s.to_string()))
    }
}
