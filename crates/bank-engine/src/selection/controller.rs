use glam::Vec2;

use crate::config::TrainerConfig;
use crate::core::geometry::Rect;
use crate::selection::state::{BallState, Mode, SelectionState};
use crate::solver::bank::{BankShotSolver, Trajectory};
use crate::solver::placement::{BallKind, ConstraintSolver};
use crate::table::playfield::TableGeometry;
use crate::table::rail::RailId;

/// Interaction state machine: mode, ball positions, pocket/rail selection,
/// and the current bank trajectory.
///
/// Every state change recomputes the trajectory. Only a single pocket with a
/// single rail produces one; two or three rails are accepted but never solved.
/// Geometry is owned by the caller and passed in.
#[derive(Debug, Clone)]
pub struct SelectionController {
    mode: Mode,
    selection: SelectionState,
    balls: BallState,
    trajectory: Option<Trajectory>,
    dragging: Option<BallKind>,
    constraints: ConstraintSolver,
    solver: BankShotSolver,
    max_rails: usize,
    pocket_hit_slop: f32,
    /// Last non-empty table rect the ball positions were fitted to.
    anchor: Rect,
}

impl SelectionController {
    /// Create a controller with both balls at their reset positions.
    pub fn new(config: &TrainerConfig, geometry: &TableGeometry) -> Self {
        let mut controller = Self {
            mode: Mode::default(),
            selection: SelectionState::new(),
            balls: BallState {
                cue: Vec2::ZERO,
                object: Vec2::ZERO,
            },
            trajectory: None,
            dragging: None,
            constraints: config.constraint_solver(),
            solver: config.bank_solver(),
            max_rails: config.max_rails,
            pocket_hit_slop: config.pocket_hit_slop,
            anchor: geometry.table_rect,
        };
        controller.reset_all(geometry);
        controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode. Ball and selection state are untouched.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.dragging = None;
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn balls(&self) -> BallState {
        self.balls
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    /// Ball currently being dragged, if any.
    pub fn dragging(&self) -> Option<BallKind> {
        self.dragging
    }

    // -- Placement --

    /// Move a ball to the nearest legal position to `point`.
    pub fn place(&mut self, kind: BallKind, point: Vec2, geometry: &TableGeometry) {
        let other = self.balls.get(kind.other());
        let legal = self
            .constraints
            .nearest_legal_point(point, kind, geometry, Some(other));
        self.balls.set(kind, legal);
        self.recompute(geometry);
    }

    pub fn place_cue(&mut self, point: Vec2, geometry: &TableGeometry) {
        self.place(BallKind::Cue, point, geometry);
    }

    pub fn place_object(&mut self, point: Vec2, geometry: &TableGeometry) {
        self.place(BallKind::Object, point, geometry);
    }

    // -- Selection --

    /// Toggle the pocket under `point`. Returns false when no pocket is hit.
    pub fn select_pocket(&mut self, point: Vec2, geometry: &TableGeometry) -> bool {
        let Some(id) = geometry.pocket_at(point, self.pocket_hit_slop) else {
            return false;
        };
        self.selection.toggle_pocket(id);
        self.recompute(geometry);
        true
    }

    /// Returns whether the rail selection changed.
    pub fn toggle_rail(&mut self, rail: RailId, geometry: &TableGeometry) -> bool {
        let changed = self.selection.toggle_rail(rail, self.max_rails);
        if changed {
            self.recompute(geometry);
        }
        changed
    }

    /// Returns whether any rail was cleared.
    pub fn clear_rails(&mut self, geometry: &TableGeometry) -> bool {
        let changed = self.selection.clear_rails();
        self.recompute(geometry);
        changed
    }

    /// Clear pocket and rails and put both balls back on the centre line,
    /// a quarter of the playfield width either side of centre.
    pub fn reset_all(&mut self, geometry: &TableGeometry) {
        self.selection.clear();
        self.dragging = None;

        let center = geometry.playfield_rect.center();
        let offset = Vec2::new(geometry.playfield_rect.width() * 0.25, 0.0);
        let object = self.constraints.nearest_legal_point(
            center + offset,
            BallKind::Object,
            geometry,
            None,
        );
        let cue = self.constraints.nearest_legal_point(
            center - offset,
            BallKind::Cue,
            geometry,
            Some(object),
        );
        self.balls = BallState { cue, object };
        self.recompute(geometry);
    }

    /// Carry ball positions over to new geometry, keeping their place on the
    /// table image, then re-apply the placement constraints.
    ///
    /// An empty table (hidden or minimised canvas) leaves the balls where they
    /// are; the next non-empty table is fitted from the last non-empty one.
    pub fn refit(&mut self, geometry: &TableGeometry) {
        if geometry.table_rect.is_empty() {
            self.recompute(geometry);
            return;
        }
        let old_table = self.anchor;
        let new_table = geometry.table_rect;
        let project = |p: Vec2| {
            if old_table.is_empty() {
                p
            } else {
                new_table.denormalize(old_table.normalize(p))
            }
        };
        let object = self.constraints.nearest_legal_point(
            project(self.balls.object),
            BallKind::Object,
            geometry,
            None,
        );
        let cue = self.constraints.nearest_legal_point(
            project(self.balls.cue),
            BallKind::Cue,
            geometry,
            Some(object),
        );
        self.balls = BallState { cue, object };
        self.anchor = new_table;
        self.recompute(geometry);
    }

    /// Re-solve the bank for the current state. Cheap and idempotent.
    pub fn recompute(&mut self, geometry: &TableGeometry) {
        self.trajectory = self.selection.single_bank().and_then(|(pocket_id, rail_id)| {
            let pocket = geometry.pocket(pocket_id)?.center;
            self.solver.plan(
                self.balls.cue,
                self.balls.object,
                pocket,
                geometry.rail(rail_id),
                geometry.ball_radius,
            )
        });
    }

    // -- Pointer events --

    /// Returns true when a discrete selection changed.
    pub fn pointer_down(&mut self, point: Vec2, geometry: &TableGeometry) -> bool {
        match self.mode {
            Mode::PlaceCue | Mode::PlaceObject => {
                if let Some(kind) = self.mode.placing() {
                    self.dragging = Some(kind);
                    self.place(kind, point, geometry);
                }
                false
            }
            Mode::SelectPocket => self.select_pocket(point, geometry),
            Mode::SelectRails => match geometry.rail_at(point) {
                Some(rail) => self.toggle_rail(rail, geometry),
                None => false,
            },
        }
    }

    pub fn pointer_move(&mut self, point: Vec2, geometry: &TableGeometry) {
        if let Some(kind) = self.dragging {
            self.place(kind, point, geometry);
        }
    }

    pub fn pointer_up(&mut self, point: Vec2, geometry: &TableGeometry) {
        if let Some(kind) = self.dragging.take() {
            self.place(kind, point, geometry);
        }
    }
}
