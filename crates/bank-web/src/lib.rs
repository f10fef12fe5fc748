//! Browser bridge for the bank-shot trainer.
//!
//! One `TrainerRunner` lives in `thread_local!` storage; the host calls the
//! exported free functions below. Pointer positions are CSS pixels relative
//! to the canvas (y down); the runner flips them into the trainer's y-up space.
//!
//! Call order: `trainer_init` once, then any of the other exports. Calls made
//! before init are logged and ignored.

pub mod runner;
pub mod storage;

pub use runner::TrainerRunner;
pub use storage::LocalStorageStore;

use std::cell::RefCell;

use bank_engine::TrainerConfig;
use glam::Vec2;
use wasm_bindgen::prelude::*;

/// Vibration pulse for selection feedback, in milliseconds.
const HAPTIC_PULSE_MS: u32 = 12;

thread_local! {
    static RUNNER: RefCell<Option<TrainerRunner<LocalStorageStore>>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut TrainerRunner<LocalStorageStore>) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("Trainer not initialized. Call trainer_init() first.");
                None
            }
        }
    })
}

fn vibrate() {
    if let Some(window) = web_sys::window() {
        window.navigator().vibrate_with_duration(HAPTIC_PULSE_MS);
    }
}

/// Create the trainer for a `width` x `height` canvas showing a table image
/// with the given aspect ratio. `config_json` may override any `TrainerConfig` field.
#[wasm_bindgen]
pub fn trainer_init(width: f32, height: f32, background_aspect: f32, config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(TrainerConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::warn!("Invalid trainer config, using defaults: {}", e);
            TrainerConfig::default()
        }
        None => TrainerConfig::default(),
    };

    let store = LocalStorageStore::new(config.storage_key.clone());
    let runner = TrainerRunner::new(config, store, Vec2::new(width, height), background_aspect)
        .with_haptic(Box::new(vibrate));

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("bank trainer: initialized ({}x{})", width, height);
}

#[wasm_bindgen]
pub fn trainer_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn trainer_set_background_aspect(aspect: f32) {
    with_runner(|r| r.set_background_aspect(aspect));
}

// ---- Input ----

#[wasm_bindgen]
pub fn trainer_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.pointer_down(x, y));
}

#[wasm_bindgen]
pub fn trainer_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.pointer_move(x, y));
}

#[wasm_bindgen]
pub fn trainer_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.pointer_up(x, y));
}

/// 0 place cue, 1 place object, 2 select pocket, 3 select rails.
#[wasm_bindgen]
pub fn trainer_set_mode(mode: u8) {
    with_runner(|r| r.set_mode(mode));
}

/// 0 top, 1 bottom, 2 left, 3 right.
#[wasm_bindgen]
pub fn trainer_toggle_rail(rail: u8) {
    with_runner(|r| r.toggle_rail(rail));
}

#[wasm_bindgen]
pub fn trainer_clear_rails() {
    with_runner(|r| r.clear_rails());
}

#[wasm_bindgen]
pub fn trainer_reset() {
    with_runner(|r| r.reset_all());
}

// ---- Calibration ----

/// Pocket codes: 0 tl, 1 tm, 2 tr, 3 bl, 4 bm, 5 br. `x`, `y` are normalized.
#[wasm_bindgen]
pub fn trainer_set_pocket(pocket: u8, x: f32, y: f32) {
    with_runner(|r| r.set_pocket_position(pocket, x, y));
}

#[wasm_bindgen]
pub fn trainer_set_rail_bounds(top: f32, bottom: f32, left: f32, right: f32) {
    with_runner(|r| r.set_rail_bounds(top, bottom, left, right));
}

#[wasm_bindgen]
pub fn trainer_clear_rail_bounds() {
    with_runner(|r| r.clear_rail_bounds());
}

#[wasm_bindgen]
pub fn trainer_set_playfield_inset(inset: f32) {
    with_runner(|r| r.set_playfield_inset(inset));
}

#[wasm_bindgen]
pub fn trainer_set_pocket_radius(radius: f32) {
    with_runner(|r| r.set_pocket_radius(radius));
}

// ---- Render sink ----

/// Full scene as JSON (viewport space, y up). `"null"` before init.
#[wasm_bindgen]
pub fn trainer_snapshot() -> String {
    with_runner(|r| r.snapshot_json()).unwrap_or_else(|| "null".to_string())
}

#[wasm_bindgen]
pub fn trainer_has_trajectory() -> bool {
    with_runner(|r| r.has_trajectory()).unwrap_or(false)
}

/// Trajectory as 10 floats (cue, ghost ball, object, bounce, pocket), or empty.
#[wasm_bindgen]
pub fn trainer_trajectory() -> js_sys::Float32Array {
    let floats = with_runner(|r| r.trajectory_floats()).unwrap_or_default();
    js_sys::Float32Array::from(floats.as_slice())
}
