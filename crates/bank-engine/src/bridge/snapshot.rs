//! Render-sink view of the trainer.
//!
//! Everything a host needs to draw one frame, as plain data. The bridge
//! serializes it to JSON; field names are camelCase to match the host side.
//!
//! Points serialize as `[x, y]` arrays in viewport space (y-up).

use glam::Vec2;
use serde::Serialize;

use crate::calibration::model::PocketId;
use crate::core::geometry::Rect;
use crate::selection::controller::SelectionController;
use crate::selection::state::Mode;
use crate::solver::bank::Trajectory;
use crate::table::playfield::{PocketCenter, TableGeometry};
use crate::table::rail::RailId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RailView {
    pub id: RailId,
    pub p0: Vec2,
    pub p1: Vec2,
    pub inward_normal: Vec2,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub table_rect: Rect,
    pub playfield_rect: Rect,
    pub cushion_thickness: f32,
    pub pocket_radius: f32,
    pub ball_radius: f32,
    pub pockets: Vec<PocketCenter>,
    pub rails: Vec<RailView>,
    pub cue_ball: Vec2,
    pub object_ball: Vec2,
    pub mode: Mode,
    pub selected_pocket: Option<PocketId>,
    pub selected_rails: Vec<RailId>,
    pub trajectory: Option<Trajectory>,
}

impl SceneSnapshot {
    pub fn capture(geometry: &TableGeometry, controller: &SelectionController) -> Self {
        let selection = controller.selection();
        let balls = controller.balls();
        let rails = geometry
            .rails
            .iter()
            .map(|r| RailView {
                id: r.id,
                p0: r.p0,
                p1: r.p1,
                inward_normal: r.inward_normal(),
                selected: selection.rails().contains(&r.id),
            })
            .collect();

        Self {
            table_rect: geometry.table_rect,
            playfield_rect: geometry.playfield_rect,
            cushion_thickness: geometry.cushion_thickness,
            pocket_radius: geometry.pocket_radius,
            ball_radius: geometry.ball_radius,
            pockets: geometry.pockets.clone(),
            rails,
            cue_ball: balls.cue,
            object_ball: balls.object,
            mode: controller.mode(),
            selected_pocket: selection.pocket(),
            selected_rails: selection.rails().to_vec(),
            trajectory: controller.trajectory().cloned(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Trajectory flattened for a line renderer:
    /// `[cue.x, cue.y, ghost.x, ghost.y, obj.x, obj.y, bounce.x, bounce.y, pocket.x, pocket.y]`.
    /// Empty when there is no trajectory.
    pub fn trajectory_floats(&self) -> Vec<f32> {
        let Some(t) = &self.trajectory else {
            return Vec::new();
        };
        t.cue_aim_segment
            .iter()
            .chain(t.object_bank_polyline.iter())
            .flat_map(|p| p.to_array())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::model::NormalizedCalibration;
    use crate::config::TrainerConfig;
    use crate::table::playfield::PlayfieldModel;

    fn setup() -> (TableGeometry, SelectionController) {
        let g = PlayfieldModel::default()
            .derive(&NormalizedCalibration::default(), Vec2::new(1000.0, 500.0), 2.0)
            .geometry;
        let c = SelectionController::new(&TrainerConfig::default(), &g);
        (g, c)
    }

    #[test]
    fn snapshot_without_selection_has_no_trajectory() {
        let (g, c) = setup();
        let snap = SceneSnapshot::capture(&g, &c);
        assert_eq!(snap.pockets.len(), 6);
        assert_eq!(snap.rails.len(), 4);
        assert!(snap.rails.iter().all(|r| !r.selected));
        assert!(snap.trajectory.is_none());
        assert!(snap.trajectory_floats().is_empty());

        let json = snap.to_json().unwrap();
        assert!(json.contains("\"trajectory\":null"));
        assert!(json.contains("\"mode\":\"placeCue\""));
        assert!(json.contains("\"id\":\"tl\""));
    }

    #[test]
    fn snapshot_flattens_trajectory() {
        let (g, mut c) = setup();
        c.place_object(Vec2::new(300.0, 200.0), &g);
        let tr = g.pocket(PocketId::Tr).unwrap().center;
        c.select_pocket(tr, &g);
        c.toggle_rail(RailId::Bottom, &g);

        let snap = SceneSnapshot::capture(&g, &c);
        assert!(snap.rails[RailId::Bottom.index()].selected);
        let floats = snap.trajectory_floats();
        assert_eq!(floats.len(), 10);
        assert_eq!(floats[4], 300.0);
        assert_eq!(floats[5], 200.0);

        let json = snap.to_json().unwrap();
        assert!(json.contains("\"cueAimSegment\""));
        assert!(json.contains("\"selectedRails\":[\"bottom\"]"));
    }
}
