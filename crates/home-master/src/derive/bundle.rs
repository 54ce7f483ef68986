use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::config::{ScrollReactivity, VisualConfig};
use crate::core::params::{Param, Params};
use crate::core::section::Section;

/// Apply one section's rule to the home record, producing a brand-new record.
pub fn derive_section(section: Section, home: &VisualConfig) -> VisualConfig {
    // The homepage renders the home record itself.
    if section == Section::Homepage {
        return home.clone();
    }

    let rule = section.rule();
    let mut params = Params::from_fn(|param| rule.field(param).apply(param, &home.params));
    params.set(Param::Hue, rule.shift_hue(home.params.hue));

    VisualConfig {
        geometry: rule.geometry,
        params,
        scroll: ScrollReactivity {
            direction: home.scroll.direction * rule.direction_multiplier,
            sensitivity: home.scroll.sensitivity * rule.direction_multiplier.abs(),
            fields: home.scroll.fields.clone(),
            combination: home.scroll.combination.clone(),
        },
    }
}

/// Home plus every section's derived configuration, always built together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBundle {
    pub home: VisualConfig,
    pub sections: BTreeMap<Section, VisualConfig>,
}

impl ConfigBundle {
    /// Recompute every section from `home`. There is no incremental path.
    pub fn derive(home: VisualConfig) -> Self {
        let sections = Section::ALL
            .into_iter()
            .map(|section| (section, derive_section(section, &home)))
            .collect();
        log::debug!(
            "derived {} sections from home (grid {:.2}, hue {:.3})",
            Section::ALL.len(),
            home.params.grid_density,
            home.params.hue
        );
        Self { home, sections }
    }

    pub fn section(&self, section: Section) -> Option<&VisualConfig> {
        self.sections.get(&section)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
