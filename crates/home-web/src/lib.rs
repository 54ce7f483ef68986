pub mod runner;

pub use runner::VisualizerRunner;

use std::cell::RefCell;
use std::fmt::Display;

use home_master::{Resolution, Section, SectionUniforms, SystemConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<VisualizerRunner>> = RefCell::new(None);
    static ON_CHANGE: RefCell<Option<js_sys::Function>> = RefCell::new(None);
}

fn js_err(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn with_runner<R>(f: impl FnOnce(&mut VisualizerRunner) -> R) -> Result<R, JsValue> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .ok_or_else(|| JsValue::from_str("home-web not initialized. Call home_init() first."))?;
        Ok(f(runner))
    })
}

/// Run a mutation, then deliver its change notifications to the page callback.
/// The callback runs after the runner borrow is released, so it may call back
/// into these exports.
fn mutate<R>(f: impl FnOnce(&mut VisualizerRunner) -> R) -> Result<R, JsValue> {
    let (out, notifications) = with_runner(|r| {
        let out = f(r);
        (out, r.take_notifications())
    })?;
    deliver(notifications);
    Ok(out)
}

fn deliver(notifications: Vec<String>) {
    let Some(callback) = ON_CHANGE.with(|cell| cell.borrow().clone()) else {
        return;
    };
    for json in notifications {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            log::warn!("change callback threw: {:?}", err);
        }
    }
}

fn random_seed() -> u64 {
    // 53 bits of Math.random mixed with the wall clock.
    let noise = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    noise ^ (js_sys::Date::now() as u64).rotate_left(17)
}

#[wasm_bindgen]
pub fn home_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = SystemConfig::from_json(config_json).map_err(js_err)?;
    let _ = console_log::init_with_level(config.log_level());

    let mut runner = VisualizerRunner::start(config, random_seed()).map_err(js_err)?;
    let notifications = runner.take_notifications();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    deliver(notifications);
    log::info!("home-web: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn home_tick(dt: f32, scroll_y: f32) -> Result<(), JsValue> {
    with_runner(|r| r.tick(dt, scroll_y))
}

// ---- Mutations ----

#[wasm_bindgen]
pub fn home_randomize() -> Result<(), JsValue> {
    mutate(|r| r.randomize())
}

#[wasm_bindgen]
pub fn home_load_preset(name: &str) -> Result<(), JsValue> {
    mutate(|r| r.load_preset(name))?.map_err(js_err)
}

#[wasm_bindgen]
pub fn home_register_preset(name: &str, json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.register_preset_json(name, json))?.map_err(js_err)
}

/// Returns the stored (clamped) value.
#[wasm_bindgen]
pub fn home_adjust_parameter(name: &str, value: f32) -> Result<f32, JsValue> {
    mutate(|r| r.adjust_parameter(name, value))?.map_err(js_err)
}

/// Returns `false` when the key was unknown and the default combination was used.
#[wasm_bindgen]
pub fn home_set_scroll_reactivity(key: &str) -> Result<bool, JsValue> {
    mutate(|r| r.set_scroll_reactivity(key) == Resolution::Matched)
}

#[wasm_bindgen]
pub fn home_set_scroll_sensitivity(sensitivity: f32) -> Result<f32, JsValue> {
    mutate(|r| r.set_scroll_sensitivity(sensitivity))
}

#[wasm_bindgen]
pub fn home_set_scroll_direction(direction: f32) -> Result<(), JsValue> {
    mutate(|r| r.set_scroll_direction(direction))
}

/// Accepts a section id or its canvas id.
#[wasm_bindgen]
pub fn home_set_active_section(id: &str) -> Result<(), JsValue> {
    let section: Section = id.parse().map_err(js_err)?;
    with_runner(|r| r.set_active_section(section))
}

// ---- Subscription ----

/// Register the page callback. It receives the full bundle as a JSON string.
/// Replaces any previous callback.
#[wasm_bindgen]
pub fn home_on_change(callback: js_sys::Function) {
    ON_CHANGE.with(|cell| {
        *cell.borrow_mut() = Some(callback);
    });
}

#[wasm_bindgen]
pub fn home_clear_on_change() {
    ON_CHANGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

// ---- Queries (JSON) ----

#[wasm_bindgen]
pub fn home_get_section_config(id: &str) -> Result<Option<String>, JsValue> {
    with_runner(|r| {
        let config = r.system().section_config_by_id(id).map_err(js_err)?;
        config.map(|c| serde_json::to_string(c).map_err(js_err)).transpose()
    })?
}

#[wasm_bindgen]
pub fn home_get_all_configurations() -> Result<Option<String>, JsValue> {
    with_runner(|r| {
        r.system()
            .all_configurations()
            .map(|bundle| bundle.to_json().map_err(js_err))
            .transpose()
    })?
}

#[wasm_bindgen]
pub fn home_preset_names() -> Result<String, JsValue> {
    with_runner(|r| serde_json::to_string(&r.system().presets().names()).map_err(js_err))?
}

/// Section id for a canvas id, if the canvas belongs to a visualizer.
#[wasm_bindgen]
pub fn home_section_for_target(canvas_id: &str) -> Option<String> {
    Section::from_target_id(canvas_id).map(|s| s.id().to_string())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_uniforms_ptr() -> *const f32 {
    with_runner(|r| r.uniforms_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_uniform_floats() -> u32 {
    with_runner(|r| r.uniform_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_uniform_stride() -> u32 {
    SectionUniforms::FLOATS as u32
}

/// Block index of a section inside the uniform buffer.
#[wasm_bindgen]
pub fn get_section_slot(id: &str) -> Result<u32, JsValue> {
    let section: Section = id.parse().map_err(js_err)?;
    Ok(section.slot() as u32)
}

#[wasm_bindgen]
pub fn get_scroll_velocity() -> f32 {
    with_runner(|r| r.scroll_velocity()).unwrap_or(0.0)
}
