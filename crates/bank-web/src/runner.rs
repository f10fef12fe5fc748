use bank_engine::{
    CalibrationStore, HapticHook, InputEvent, InputQueue, Mode, NormalizedPoint, PocketId,
    RailBounds, RailId, SceneSnapshot, Trainer, TrainerConfig,
};
use glam::Vec2;

/// Drives a `Trainer` from browser callbacks.
///
/// The browser hands us CSS pixel coordinates (origin top-left, y down);
/// the trainer works y-up, so every pointer position is flipped here.
/// wasm-bindgen cannot export generic structs, so the cdylib keeps one
/// runner in a `thread_local!` and exports free functions around it.
pub struct TrainerRunner<S: CalibrationStore> {
    trainer: Trainer<S>,
    input: InputQueue,
}

impl<S: CalibrationStore> TrainerRunner<S> {
    pub fn new(config: TrainerConfig, store: S, viewport: Vec2, background_aspect: f32) -> Self {
        Self {
            trainer: Trainer::new(config, store, viewport, background_aspect),
            input: InputQueue::new(),
        }
    }

    pub fn with_haptic(mut self, hook: HapticHook) -> Self {
        self.trainer.set_haptic(Some(hook));
        self
    }

    pub fn trainer(&self) -> &Trainer<S> {
        &self.trainer
    }

    /// Queue an event and apply it right away.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
        self.flush();
    }

    pub fn flush(&mut self) {
        self.trainer.handle_input(&mut self.input);
    }

    /// Convert a CSS pixel position to viewport space.
    pub fn to_viewport(&self, css_x: f32, css_y: f32) -> Vec2 {
        Vec2::new(css_x, self.trainer.viewport().y - css_y)
    }

    pub fn pointer_down(&mut self, css_x: f32, css_y: f32) {
        let p = self.to_viewport(css_x, css_y);
        self.push_input(InputEvent::PointerDown { x: p.x, y: p.y });
    }

    pub fn pointer_move(&mut self, css_x: f32, css_y: f32) {
        let p = self.to_viewport(css_x, css_y);
        self.push_input(InputEvent::PointerMove { x: p.x, y: p.y });
    }

    pub fn pointer_up(&mut self, css_x: f32, css_y: f32) {
        let p = self.to_viewport(css_x, css_y);
        self.push_input(InputEvent::PointerUp { x: p.x, y: p.y });
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.push_input(InputEvent::Resize { width, height });
    }

    /// Unknown mode codes are ignored.
    pub fn set_mode(&mut self, code: u8) {
        match Mode::from_u8(code) {
            Some(mode) => self.push_input(InputEvent::SetMode(mode)),
            None => log::warn!("Unknown mode code {}", code),
        }
    }

    pub fn toggle_rail(&mut self, code: u8) {
        match RailId::from_u8(code) {
            Some(rail) => self.push_input(InputEvent::ToggleRail(rail)),
            None => log::warn!("Unknown rail code {}", code),
        }
    }

    pub fn clear_rails(&mut self) {
        self.push_input(InputEvent::ClearRails);
    }

    pub fn reset_all(&mut self) {
        self.push_input(InputEvent::ResetAll);
    }

    // ---- Calibration edits ----

    pub fn set_pocket_position(&mut self, code: u8, x: f32, y: f32) {
        match PocketId::from_u8(code) {
            Some(id) => self.trainer.set_pocket_position(id, NormalizedPoint::new(x, y)),
            None => log::warn!("Unknown pocket code {}", code),
        }
    }

    pub fn set_rail_bounds(&mut self, top: f32, bottom: f32, left: f32, right: f32) {
        self.trainer.set_rail_bounds(RailBounds {
            top,
            bottom,
            left,
            right,
        });
    }

    pub fn clear_rail_bounds(&mut self) {
        self.trainer.clear_rail_bounds();
    }

    pub fn set_playfield_inset(&mut self, inset: f32) {
        self.trainer.set_playfield_inset(inset);
    }

    pub fn set_pocket_radius(&mut self, radius: f32) {
        self.trainer.set_pocket_radius(radius);
    }

    pub fn set_background_aspect(&mut self, aspect: f32) {
        self.trainer.set_background_aspect(aspect);
    }

    // ---- Render sink ----

    pub fn snapshot(&self) -> SceneSnapshot {
        self.trainer.snapshot()
    }

    /// Scene as JSON, or `"null"` if serialization fails.
    pub fn snapshot_json(&self) -> String {
        match self.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                "null".to_string()
            }
        }
    }

    pub fn trajectory_floats(&self) -> Vec<f32> {
        self.snapshot().trajectory_floats()
    }

    pub fn has_trajectory(&self) -> bool {
        self.trainer.current_trajectory().is_some()
    }
}
