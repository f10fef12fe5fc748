use glam::Vec2;

use crate::bridge::snapshot::SceneSnapshot;
use crate::calibration::model::{NormalizedCalibration, NormalizedPoint, PocketId, RailBounds};
use crate::calibration::store::CalibrationStore;
use crate::config::TrainerConfig;
use crate::input::queue::{InputEvent, InputQueue};
use crate::selection::controller::SelectionController;
use crate::selection::state::Mode;
use crate::solver::bank::Trajectory;
use crate::table::playfield::{PlayfieldModel, TableGeometry};
use crate::table::rail::RailId;

/// Callback fired on discrete selection changes and resets.
pub type HapticHook = Box<dyn FnMut()>;

/// Host-facing trainer: owns the calibration, the derived geometry and the
/// interaction state, and persists calibration edits through a store.
///
/// All positions are viewport coordinates (y-up).
pub struct Trainer<S: CalibrationStore> {
    store: S,
    calibration: NormalizedCalibration,
    viewport: Vec2,
    background_aspect: f32,
    model: PlayfieldModel,
    geometry: TableGeometry,
    controller: SelectionController,
    haptic: Option<HapticHook>,
}

impl<S: CalibrationStore> Trainer<S> {
    /// Load the stored calibration (or the default), derive geometry for
    /// `viewport` and put both balls at their reset positions.
    pub fn new(config: TrainerConfig, store: S, viewport: Vec2, background_aspect: f32) -> Self {
        let stored = store.load();
        let calibration = match stored {
            Some(cal) => {
                log::info!("Calibration loaded ({} pockets)", cal.pockets.len());
                cal
            }
            None => {
                log::info!("No stored calibration, using defaults");
                NormalizedCalibration::default()
            }
        };

        let model = config.playfield_model();
        let derivation = model.derive(&calibration, viewport, background_aspect);
        let controller = SelectionController::new(&config, &derivation.geometry);

        let mut trainer = Self {
            store,
            calibration: derivation.calibration,
            viewport,
            background_aspect,
            model,
            geometry: derivation.geometry,
            controller,
            haptic: None,
        };
        if derivation.seeded {
            log::info!("Seeded missing pockets with defaults");
            trainer.persist();
        }
        trainer
    }

    pub fn with_haptic(mut self, hook: HapticHook) -> Self {
        self.haptic = Some(hook);
        self
    }

    pub fn set_haptic(&mut self, hook: Option<HapticHook>) {
        self.haptic = hook;
    }

    // -- Accessors --

    pub fn calibration(&self) -> &NormalizedCalibration {
        &self.calibration
    }

    pub fn geometry(&self) -> &TableGeometry {
        &self.geometry
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn current_trajectory(&self) -> Option<&Trajectory> {
        self.controller.trajectory()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.geometry, &self.controller)
    }

    // -- Viewport --

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        if self.rederive() {
            self.persist();
        }
    }

    pub fn set_background_aspect(&mut self, aspect: f32) {
        self.background_aspect = aspect;
        if self.rederive() {
            self.persist();
        }
    }

    // -- Interaction --

    pub fn set_mode(&mut self, mode: Mode) {
        self.controller.set_mode(mode);
    }

    pub fn place_cue(&mut self, point: Vec2) {
        self.controller.place_cue(point, &self.geometry);
    }

    pub fn place_object(&mut self, point: Vec2) {
        self.controller.place_object(point, &self.geometry);
    }

    pub fn select_pocket(&mut self, point: Vec2) -> bool {
        let changed = self.controller.select_pocket(point, &self.geometry);
        self.buzz_if(changed);
        changed
    }

    pub fn toggle_rail(&mut self, rail: RailId) -> bool {
        let changed = self.controller.toggle_rail(rail, &self.geometry);
        self.buzz_if(changed);
        changed
    }

    pub fn clear_rails(&mut self) -> bool {
        let changed = self.controller.clear_rails(&self.geometry);
        self.buzz_if(changed);
        changed
    }

    pub fn reset_all(&mut self) {
        self.controller.reset_all(&self.geometry);
        log::info!("Balls and selection reset");
        self.buzz_if(true);
    }

    pub fn pointer_down(&mut self, point: Vec2) {
        let changed = self.controller.pointer_down(point, &self.geometry);
        self.buzz_if(changed);
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        self.controller.pointer_move(point, &self.geometry);
    }

    pub fn pointer_up(&mut self, point: Vec2) {
        self.controller.pointer_up(point, &self.geometry);
    }

    /// Apply every queued event in order.
    pub fn handle_input(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            match event {
                InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
                InputEvent::PointerUp { x, y } => self.pointer_up(Vec2::new(x, y)),
                InputEvent::Resize { width, height } => self.resize(Vec2::new(width, height)),
                InputEvent::SetMode(mode) => self.set_mode(mode),
                InputEvent::ToggleRail(rail) => {
                    self.toggle_rail(rail);
                }
                InputEvent::ClearRails => {
                    self.clear_rails();
                }
                InputEvent::ResetAll => self.reset_all(),
            }
        }
    }

    // -- Calibration edits (clamped, re-derived, persisted) --

    pub fn set_calibration(&mut self, calibration: NormalizedCalibration) {
        self.calibration = calibration.sanitized();
        self.commit_calibration();
    }

    pub fn set_pocket_position(&mut self, id: PocketId, point: NormalizedPoint) {
        self.calibration.set_pocket(id, point);
        self.commit_calibration();
    }

    pub fn set_rail_bounds(&mut self, bounds: RailBounds) {
        self.calibration.set_rails(bounds);
        self.commit_calibration();
    }

    pub fn clear_rail_bounds(&mut self) {
        self.calibration.clear_rails();
        self.commit_calibration();
    }

    pub fn set_playfield_inset(&mut self, inset: f32) {
        self.calibration.set_playfield_inset(inset);
        self.commit_calibration();
    }

    pub fn set_pocket_radius(&mut self, radius: f32) {
        self.calibration.set_pocket_radius(radius);
        self.commit_calibration();
    }

    // -- Internals --

    fn commit_calibration(&mut self) {
        self.rederive();
        self.persist();
    }

    /// Rebuild geometry from the current calibration and viewport, then
    /// carry the balls over. Returns whether missing pockets were seeded.
    fn rederive(&mut self) -> bool {
        let derivation = self
            .model
            .derive(&self.calibration, self.viewport, self.background_aspect);
        self.geometry = derivation.geometry;
        self.calibration = derivation.calibration;
        self.controller.refit(&self.geometry);
        derivation.seeded
    }

    fn persist(&mut self) {
        self.store.save(&self.calibration);
        log::info!("Calibration saved");
    }

    fn buzz_if(&mut self, changed: bool) {
        if !changed {
            return;
        }
        if let Some(hook) = self.haptic.as_mut() {
            hook();
        }
    }
}
