use std::cell::RefCell;
use std::rc::Rc;

use home_master::{
    scroll_overlay, ConfigError, HomeMaster, Param, Resolution, ScrollTracker, Section,
    SystemConfig, Transition, UniformBuffer, VisualConfig,
};

/// Drives one page's visualizers: owns the store, samples scroll, eases the
/// active section toward its current configuration and packs uniforms.
///
/// Kept free of wasm types so it can be tested natively; `lib.rs` holds the
/// `thread_local!` instance and the `#[wasm_bindgen]` exports.
pub struct VisualizerRunner {
    system: HomeMaster,
    config: SystemConfig,
    tracker: ScrollTracker,
    active: Section,
    transition: Option<Transition>,
    uniforms: UniformBuffer,
    /// Seconds since init, advanced by `tick`.
    clock: f64,
    /// Serialized bundles waiting to be handed to the page callback.
    notifications: Rc<RefCell<Vec<String>>>,
}

impl VisualizerRunner {
    pub fn new(config: SystemConfig, seed: u64) -> Self {
        let notifications = Rc::new(RefCell::new(Vec::new()));
        let mut system = HomeMaster::new(config.seed.unwrap_or(seed));

        let queue = notifications.clone();
        system.on_change(move |bundle| match bundle.to_json() {
            Ok(json) => queue.borrow_mut().push(json),
            Err(err) => log::error!("could not serialize configuration bundle: {}", err),
        });

        let active = config.active_section.parse().unwrap_or_else(|err| {
            log::warn!("{}, starting on homepage", err);
            Section::Homepage
        });

        Self {
            tracker: ScrollTracker::new(config.scroll),
            system,
            config,
            active,
            transition: None,
            uniforms: UniformBuffer::new(),
            clock: 0.0,
            notifications,
        }
    }

    /// A runner with its initial home in place. Fails without leaving a
    /// half-initialized runner behind.
    pub fn start(config: SystemConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut runner = Self::new(config, seed);
        runner.init()?;
        Ok(runner)
    }

    /// Create the initial home: the configured preset if any, otherwise random.
    pub fn init(&mut self) -> Result<(), ConfigError> {
        match self.config.initial_preset.clone() {
            Some(name) => self.system.load_preset(&name)?,
            None => self.system.randomize_home(),
        }
        if let Some(key) = self.config.initial_scroll.clone() {
            if self.system.set_scroll_reactivity(&key) == Resolution::FellBack {
                log::warn!("initialScroll '{}' is not a scroll combination, using the default", key);
            }
        }
        // First frame shows the target directly.
        self.transition = self.system.section_config(self.active).cloned().map(Transition::settled);
        self.write_uniforms(0.0);
        Ok(())
    }

    pub fn system(&self) -> &HomeMaster {
        &self.system
    }

    pub fn active_section(&self) -> Section {
        self.active
    }

    // -- Mutations (each one retargets the active transition) --

    pub fn randomize(&mut self) {
        self.system.randomize_home();
        self.retarget();
    }

    pub fn load_preset(&mut self, name: &str) -> Result<(), ConfigError> {
        self.system.load_preset(name)?;
        self.retarget();
        Ok(())
    }

    pub fn register_preset_json(&mut self, name: &str, json: &str) -> Result<(), ConfigError> {
        self.system.register_preset_json(name, json)
    }

    pub fn adjust_parameter(&mut self, name: &str, value: f32) -> Result<f32, ConfigError> {
        let param: Param = name.parse()?;
        let stored = self.system.adjust_parameter(param, value);
        self.retarget();
        Ok(stored)
    }

    pub fn set_scroll_reactivity(&mut self, key: &str) -> Resolution {
        let resolution = self.system.set_scroll_reactivity(key);
        self.retarget();
        resolution
    }

    pub fn set_scroll_sensitivity(&mut self, sensitivity: f32) -> f32 {
        let stored = self.system.set_scroll_sensitivity(sensitivity);
        self.retarget();
        stored
    }

    pub fn set_scroll_direction(&mut self, direction: f32) {
        self.system.set_scroll_direction(direction);
        self.retarget();
    }

    /// Move the background visualizer to another section's look.
    pub fn set_active_section(&mut self, section: Section) {
        if section == self.active {
            return;
        }
        log::debug!("active section {} -> {}", self.active, section);
        self.active = section;
        self.retarget();
    }

    fn retarget(&mut self) {
        let Some(target) = self.system.section_config(self.active).cloned() else {
            return;
        };
        match self.transition.as_mut() {
            Some(transition) => transition.retarget_with(
                target,
                self.config.transition_seconds,
                self.config.transition_easing,
            ),
            None => self.transition = Some(Transition::settled(target)),
        }
    }

    // -- Frame --

    /// One animation frame. `dt` in seconds, `scroll_y` in pixels.
    pub fn tick(&mut self, dt: f32, scroll_y: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt as f64;
        }
        let velocity = self.tracker.sample(scroll_y, self.clock);
        if let Some(transition) = self.transition.as_mut() {
            transition.advance(dt);
        }
        self.write_uniforms(velocity);
    }

    /// The configuration a section renders this frame, before scroll overlay.
    pub fn frame_base(&self, section: Section) -> Option<VisualConfig> {
        if section == self.active {
            if let Some(transition) = &self.transition {
                return Some(transition.current());
            }
        }
        self.system.section_config(section).cloned()
    }

    fn write_uniforms(&mut self, velocity: f32) {
        for section in Section::ALL {
            if let Some(base) = self.frame_base(section) {
                let frame = scroll_overlay(&base, velocity);
                self.uniforms.write(section, &frame);
            }
        }
    }

    /// Serialized bundles produced since the last call, oldest first.
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut *self.notifications.borrow_mut())
    }

    // ---- Accessors for JS reads ----

    pub fn uniforms(&self) -> &UniformBuffer {
        &self.uniforms
    }

    pub fn uniforms_ptr(&self) -> *const f32 {
        self.uniforms.as_ptr()
    }

    pub fn uniform_floats(&self) -> u32 {
        self.uniforms.float_count()
    }

    pub fn scroll_velocity(&self) -> f32 {
        self.tracker.velocity()
    }
}
