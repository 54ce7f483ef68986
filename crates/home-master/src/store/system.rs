// store/system.rs
//
// The home configuration store. Owns the single home record, the bundle
// derived from it, and the change callback. Every mutation ends in
// `replace_home()`, which rebuilds the whole bundle and notifies.
//
// Usage:
//   let mut system = HomeMaster::new(seed);
//   system.on_change(|bundle| { /* push to renderers */ });
//   system.randomize_home();
//   system.adjust_parameter(Param::GridDensity, 14.0);

use std::fmt;

use super::combinations::{self, Resolution};
use super::presets::{Preset, PresetCatalog};
use crate::core::config::{ScrollReactivity, VisualConfig};
use crate::core::params::{Param, Params, SENSITIVITY_RANDOM, SENSITIVITY_RANGE};
use crate::core::rng::Rng;
use crate::core::section::Section;
use crate::derive::ConfigBundle;
use crate::error::ConfigError;

type ChangeCallback = Box<dyn FnMut(&ConfigBundle)>;

/// Single authoritative home configuration plus everything derived from it.
pub struct HomeMaster {
    state: Option<ConfigBundle>,
    rng: Rng,
    presets: PresetCatalog,
    on_change: Option<ChangeCallback>,
}

impl HomeMaster {
    /// An empty store. No configuration exists until the first mutation.
    pub fn new(seed: u64) -> Self {
        Self {
            state: None,
            rng: Rng::new(seed),
            presets: PresetCatalog::new(),
            on_change: None,
        }
    }

    // -- Queries --

    pub fn home(&self) -> Option<&VisualConfig> {
        self.state.as_ref().map(|s| &s.home)
    }

    pub fn section_config(&self, section: Section) -> Option<&VisualConfig> {
        self.state.as_ref().and_then(|s| s.section(section))
    }

    /// Look up by section id or canvas id.
    pub fn section_config_by_id(&self, id: &str) -> Result<Option<&VisualConfig>, ConfigError> {
        let section: Section = id.parse()?;
        Ok(self.section_config(section))
    }

    pub fn all_configurations(&self) -> Option<&ConfigBundle> {
        self.state.as_ref()
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    // -- Subscription --

    /// Register the change callback. Replaces any previous one.
    pub fn on_change(&mut self, callback: impl FnMut(&ConfigBundle) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    // -- Mutations --

    /// Draw a new home from the randomization ranges.
    pub fn randomize_home(&mut self) {
        let home = self.random_home();
        log::info!("home randomized (scroll '{}', direction {})", home.scroll.combination, home.scroll.direction);
        self.replace_home(home);
    }

    fn random_home(&mut self) -> VisualConfig {
        let params = Params::from_fn(|param| {
            let range = param.random_range();
            self.rng.range(range.min, range.max)
        });
        let (key, fields) = self
            .rng
            .pick(combinations::COMBINATIONS)
            .copied()
            .unwrap_or_else(combinations::default_combination);
        let direction = self.rng.sign();
        let sensitivity = self.rng.range(SENSITIVITY_RANDOM.min, SENSITIVITY_RANDOM.max);

        VisualConfig {
            geometry: Section::Homepage.geometry(),
            params,
            scroll: ScrollReactivity::new(direction, sensitivity, key, fields),
        }
    }

    /// Replace home with a named preset merged over the baseline.
    /// Unknown names leave the configuration untouched.
    pub fn load_preset(&mut self, name: &str) -> Result<(), ConfigError> {
        let preset = self
            .presets
            .get(name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        log::info!("loading preset '{}'", name);
        self.replace_home(preset.to_home());
        Ok(())
    }

    pub fn register_preset(&mut self, name: &str, preset: Preset) {
        self.presets.register(name, preset);
    }

    pub fn register_preset_json(&mut self, name: &str, json: &str) -> Result<(), ConfigError> {
        let preset = Preset::from_json(json)?;
        self.register_preset(name, preset);
        Ok(())
    }

    /// Clamp and store one field. Returns the stored value.
    pub fn adjust_parameter(&mut self, param: Param, value: f32) -> f32 {
        let stored = self.mutate_home(|home| home.params.set_clamped(param, value));
        log::debug!("{} set to {} (requested {})", param, stored, value);
        stored
    }

    pub fn adjust_parameter_by_name(&mut self, name: &str, value: f32) -> Result<f32, ConfigError> {
        let param: Param = name.parse()?;
        Ok(self.adjust_parameter(param, value))
    }

    pub fn set_scroll_sensitivity(&mut self, sensitivity: f32) -> f32 {
        self.mutate_home(|home| {
            home.scroll.sensitivity = SENSITIVITY_RANGE.clamp(sensitivity);
            home.scroll.sensitivity
        })
    }

    /// Negative values invert, anything else is forward.
    pub fn set_scroll_direction(&mut self, direction: f32) {
        self.mutate_home(|home| {
            home.scroll.direction = if direction < 0.0 { -1.0 } else { 1.0 };
        });
    }

    /// Switch the scroll-reactive field subset. Unknown keys use the default combination.
    pub fn set_scroll_reactivity(&mut self, key: &str) -> Resolution {
        let ((resolved, fields), resolution) = combinations::resolve(key);
        if resolution == Resolution::FellBack {
            log::warn!("unknown scroll combination '{}', falling back to '{}'", key, resolved);
        }
        self.mutate_home(|home| {
            home.scroll.fields = fields.to_vec();
            home.scroll.combination = resolved.to_string();
        });
        resolution
    }

    // -- Internals --

    /// Run `f` on the current home, then re-derive. An empty store gets a random
    /// home first; the caller's change and the new home share one notification.
    fn mutate_home<R>(&mut self, f: impl FnOnce(&mut VisualConfig) -> R) -> R {
        let mut home = match self.state.as_ref() {
            Some(state) => state.home.clone(),
            None => self.random_home(),
        };
        let out = f(&mut home);
        self.replace_home(home);
        out
    }

    fn replace_home(&mut self, home: VisualConfig) {
        self.state = Some(ConfigBundle::derive(home));
        self.notify();
    }

    fn notify(&mut self) {
        if let (Some(callback), Some(state)) = (self.on_change.as_mut(), self.state.as_ref()) {
            callback(state);
        }
    }
}

impl fmt::Debug for HomeMaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeMaster")
            .field("state", &self.state)
            .field("presets", &self.presets)
            .field("has_callback", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn starts_empty() {
        let system = HomeMaster::new(1);
        assert!(system.home().is_none());
        assert!(system.section_config(Section::Homepage).is_none());
        assert!(system.all_configurations().is_none());
    }

    #[test]
    fn adjust_creates_home_and_clamps() {
        let mut system = HomeMaster::new(9);
        let stored = system.adjust_parameter(Param::GridDensity, 250.0);
        assert_eq!(stored, 100.0);
        assert_eq!(system.section_config(Section::Homepage).unwrap().params.grid_density, 100.0);
    }

    #[test]
    fn adjust_by_name_rejects_unknown_fields() {
        let mut system = HomeMaster::new(9);
        assert!(matches!(
            system.adjust_parameter_by_name("sparkle", 1.0),
            Err(ConfigError::UnknownParameter(_))
        ));
        assert!(system.home().is_none());
        assert_eq!(system.adjust_parameter_by_name("morphFactor", 0.25).unwrap(), 0.25);
    }

    #[test]
    fn unknown_preset_is_an_error_and_changes_nothing() {
        let mut system = HomeMaster::new(5);
        system.load_preset("elegant").unwrap();
        let before = system.all_configurations().cloned();

        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        system.on_change(move |_| *counter.borrow_mut() += 1);

        let err = system.load_preset("nonexistent-name").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(name) if name == "nonexistent-name"));
        assert_eq!(system.all_configurations().cloned(), before);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn callback_sees_fresh_derivation_before_return() {
        let mut system = HomeMaster::new(5);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        system.on_change(move |bundle| {
            sink.borrow_mut().push(bundle.section(Section::Homepage).unwrap().params.morph_factor);
        });

        system.load_preset("minimal").unwrap();
        system.adjust_parameter(Param::MorphFactor, 0.75);
        assert_eq!(*seen.borrow(), vec![0.1, 0.75]);
    }

    #[test]
    fn first_mutation_on_empty_store_notifies_once() {
        let mut system = HomeMaster::new(5);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        system.on_change(move |bundle| sink.borrow_mut().push(bundle.home.params.grid_density));

        system.adjust_parameter(Param::GridDensity, 30.0);
        assert_eq!(*seen.borrow(), vec![30.0]);
        assert_eq!(system.home().unwrap().params.grid_density, 30.0);
    }

    #[test]
    fn last_registration_wins() {
        let mut system = HomeMaster::new(5);
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let a = first.clone();
        let b = second.clone();
        system.on_change(move |_| *a.borrow_mut() += 1);
        system.on_change(move |_| *b.borrow_mut() += 1);
        system.randomize_home();
        assert_eq!((*first.borrow(), *second.borrow()), (0, 1));

        system.clear_on_change();
        system.randomize_home();
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn scroll_reactivity_reports_fallback() {
        let mut system = HomeMaster::new(5);
        assert_eq!(system.set_scroll_reactivity("color-flow"), Resolution::Matched);
        assert_eq!(system.home().unwrap().scroll.fields, vec![Param::Hue, Param::ColorShift]);

        assert_eq!(system.set_scroll_reactivity("sideways"), Resolution::FellBack);
        let home = system.home().unwrap();
        assert_eq!(home.scroll.combination, combinations::DEFAULT_COMBINATION);
        for section in Section::ALL {
            let derived = system.section_config(section).unwrap();
            assert_eq!(derived.scroll.combination, combinations::DEFAULT_COMBINATION);
        }
    }

    #[test]
    fn randomized_home_is_inside_random_ranges() {
        let mut system = HomeMaster::new(77);
        for _ in 0..50 {
            system.randomize_home();
            let home = system.home().unwrap();
            for param in Param::ALL {
                let range = param.random_range();
                assert!(range.contains(home.get(param)), "{param} = {}", home.get(param));
            }
            assert!(home.scroll.direction == 1.0 || home.scroll.direction == -1.0);
            assert!(SENSITIVITY_RANDOM.contains(home.scroll.sensitivity));
        }
    }

    #[test]
    fn same_seed_same_home() {
        let mut a = HomeMaster::new(1234);
        let mut b = HomeMaster::new(1234);
        a.randomize_home();
        b.randomize_home();
        assert_eq!(a.home(), b.home());
    }

    #[test]
    fn scroll_knobs_are_clamped() {
        let mut system = HomeMaster::new(3);
        assert_eq!(system.set_scroll_sensitivity(10.0), 3.0);
        system.set_scroll_direction(-0.2);
        assert_eq!(system.home().unwrap().scroll.direction, -1.0);
        assert_eq!(system.section_config(Section::TechShowcase).unwrap().scroll.direction, 1.0);
    }

    #[test]
    fn registered_json_preset_loads() {
        let mut system = HomeMaster::new(3);
        system.register_preset_json("aurora", r#"{ "hue": 0.4, "saturation": 0.9 }"#).unwrap();
        system.load_preset("aurora").unwrap();
        assert_eq!(system.home().unwrap().params.hue, 0.4);
        assert!(system.register_preset_json("broken", "{").is_err());
    }

    #[test]
    fn lookup_by_canvas_id() {
        let mut system = HomeMaster::new(3);
        system.randomize_home();
        let by_canvas = system.section_config_by_id("research-archive-canvas").unwrap();
        assert_eq!(by_canvas, system.section_config(Section::ResearchArchive));
        assert!(system.section_config_by_id("footer").is_err());
    }
}
