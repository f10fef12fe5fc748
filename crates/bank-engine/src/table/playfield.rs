//! Derived table geometry.
//!
//! Turns a `NormalizedCalibration` plus the current viewport into concrete
//! primitives: table rect, playfield rect, pockets, rails and radii.
//! Everything here is recomputed from scratch on every resize or calibration
//! edit; nothing is mutated in place.

use glam::Vec2;
use serde::Serialize;

use crate::calibration::model::{NormalizedCalibration, PocketId};
use crate::core::geometry::{aspect_fit, distance_within_segment, Rect};
use crate::table::rail::{RailId, RailSegment};

/// A pocket's centre in viewport space. All pockets share `TableGeometry::pocket_radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PocketCenter {
    pub id: PocketId,
    pub center: Vec2,
}

/// Concrete geometry for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGeometry {
    /// Where the background table image sits in the viewport.
    pub table_rect: Rect,
    /// The rectangle bounding legal ball travel.
    pub playfield_rect: Rect,
    /// Pockets in fixed `PocketId::ALL` order.
    pub pockets: Vec<PocketCenter>,
    /// Rails in fixed `RailId::ALL` order.
    pub rails: [RailSegment; 4],
    pub pocket_radius: f32,
    pub ball_radius: f32,
    pub cushion_thickness: f32,
}

/// Result of a derivation: the geometry plus the calibration it was built
/// from, with any missing pockets seeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub geometry: TableGeometry,
    pub calibration: NormalizedCalibration,
    /// Whether pockets were seeded (the calibration differs from the input).
    pub seeded: bool,
}

/// Pure geometry derivation. Same inputs always produce identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldModel {
    pub ball_radius_fraction: f32,
    pub cushion_fraction: f32,
    pub min_cushion_thickness: f32,
}

impl Default for PlayfieldModel {
    fn default() -> Self {
        Self {
            ball_radius_fraction: 0.0265,
            cushion_fraction: 0.06,
            min_cushion_thickness: 10.0,
        }
    }
}

impl PlayfieldModel {
    /// Derive geometry for `viewport` (width, height) with the background
    /// image's aspect ratio (width / height).
    pub fn derive(
        &self,
        calibration: &NormalizedCalibration,
        viewport: Vec2,
        background_aspect: f32,
    ) -> Derivation {
        let table_rect = aspect_fit(background_aspect, viewport);
        let table_short = table_rect.shorter_side();

        let (playfield_rect, cushion_thickness) = match calibration.rails {
            Some(bounds) => {
                let a = table_rect.denormalize(Vec2::new(bounds.left, bounds.bottom));
                let b = table_rect.denormalize(Vec2::new(bounds.right, bounds.top));
                let cushion = (table_short * self.cushion_fraction).max(self.min_cushion_thickness);
                (Rect::from_corners(a, b), cushion)
            }
            None => {
                let inset = calibration.playfield_inset * table_short;
                (table_rect.inset(inset), inset)
            }
        };

        let (calibration, seeded) = calibration.seeded();
        let pockets = PocketId::ALL
            .iter()
            .map(|&id| PocketCenter {
                id,
                center: table_rect.denormalize(calibration.pocket(id).to_vec2()),
            })
            .collect();

        let rails = RailId::ALL.map(|id| RailSegment::on_playfield(id, &playfield_rect));

        let geometry = TableGeometry {
            table_rect,
            playfield_rect,
            pockets,
            rails,
            pocket_radius: calibration.pocket_radius * table_short,
            ball_radius: self.ball_radius_fraction * playfield_rect.shorter_side(),
            cushion_thickness,
        };

        Derivation {
            geometry,
            calibration,
            seeded,
        }
    }
}

impl TableGeometry {
    pub fn pocket(&self, id: PocketId) -> Option<&PocketCenter> {
        self.pockets.iter().find(|p| p.id == id)
    }

    pub fn rail(&self, id: RailId) -> &RailSegment {
        &self.rails[id.index()]
    }

    /// Where a ball centre may legally sit: the playfield inset by one ball radius.
    pub fn legal_area(&self) -> Rect {
        self.playfield_rect.inset(self.ball_radius)
    }

    /// Nearest pocket within `slop * pocket_radius` of `point`.
    pub fn pocket_at(&self, point: Vec2, slop: f32) -> Option<PocketId> {
        let reach = self.pocket_radius * slop;
        self.pockets
            .iter()
            .map(|p| (p.id, p.center.distance(point)))
            .filter(|&(_, d)| d <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Nearest rail within one cushion thickness of `point`, clipped to the
    /// rail's extent. Taps past a playfield corner hit nothing.
    pub fn rail_at(&self, point: Vec2) -> Option<RailId> {
        let reach = self.cushion_thickness.max(self.ball_radius);
        self.rails
            .iter()
            .filter_map(|r| Some((r.id, distance_within_segment(r.p0, r.p1, point)?)))
            .filter(|&(_, d)| d <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::model::{NormalizedPoint, RailBounds};

    fn derive_default(viewport: Vec2, aspect: f32) -> Derivation {
        PlayfieldModel::default().derive(&NormalizedCalibration::default(), viewport, aspect)
    }

    #[test]
    fn inset_fallback_shrinks_table_uniformly() {
        let d = derive_default(Vec2::new(1000.0, 500.0), 2.0);
        let g = &d.geometry;
        assert_eq!(g.table_rect, Rect::new(Vec2::ZERO, Vec2::new(1000.0, 500.0)));
        assert!((g.cushion_thickness - 40.0).abs() < 1e-4);
        assert!((g.playfield_rect.min - Vec2::new(40.0, 40.0)).length() < 1e-4);
        assert!((g.playfield_rect.max - Vec2::new(960.0, 460.0)).length() < 1e-4);
        assert!((g.pocket_radius - 22.5).abs() < 1e-4);
        assert!((g.ball_radius - 0.0265 * 420.0).abs() < 1e-4);
        assert!(!d.seeded);
    }

    #[test]
    fn calibrated_rails_define_playfield() {
        let mut cal = NormalizedCalibration::default();
        cal.set_rails(RailBounds { top: 0.9, bottom: 0.1, left: 0.05, right: 0.95 });
        let d = PlayfieldModel::default().derive(&cal, Vec2::new(1000.0, 500.0), 2.0);
        let g = &d.geometry;
        assert!((g.playfield_rect.min - Vec2::new(50.0, 50.0)).length() < 1e-3);
        assert!((g.playfield_rect.max - Vec2::new(950.0, 450.0)).length() < 1e-3);
        // max(10, 500 * 0.06)
        assert!((g.cushion_thickness - 30.0).abs() < 1e-4);
    }

    #[test]
    fn small_table_uses_minimum_cushion() {
        let mut cal = NormalizedCalibration::default();
        cal.set_rails(RailBounds { top: 0.9, bottom: 0.1, left: 0.1, right: 0.9 });
        let d = PlayfieldModel::default().derive(&cal, Vec2::new(100.0, 50.0), 2.0);
        assert_eq!(d.geometry.cushion_thickness, 10.0);
    }

    #[test]
    fn inverted_rails_still_form_a_rect() {
        let mut cal = NormalizedCalibration::default();
        cal.set_rails(RailBounds { top: 0.1, bottom: 0.9, left: 0.8, right: 0.2 });
        let g = PlayfieldModel::default()
            .derive(&cal, Vec2::new(800.0, 400.0), 2.0)
            .geometry;
        assert!(g.playfield_rect.width() > 0.0);
        assert!(g.playfield_rect.height() > 0.0);
        assert!(g.table_rect.contains_rect(&g.playfield_rect));
    }

    #[test]
    fn playfield_is_always_inside_table() {
        let model = PlayfieldModel::default();
        let viewports = [
            Vec2::new(1024.0, 768.0),
            Vec2::new(390.0, 844.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(3840.0, 1000.0),
            Vec2::ZERO,
        ];
        let aspects = [2.0, 1.0, 0.4, 1.777, 0.0];
        let insets = [0.0, 0.08, 0.3, 0.5];
        let rails = [
            None,
            Some(RailBounds { top: 1.0, bottom: 0.0, left: 0.0, right: 1.0 }),
            Some(RailBounds { top: 0.93, bottom: 0.07, left: 0.04, right: 0.96 }),
            Some(RailBounds { top: 0.5, bottom: 0.5, left: 0.5, right: 0.5 }),
        ];

        for &viewport in &viewports {
            for &aspect in &aspects {
                for &inset in &insets {
                    for &r in &rails {
                        let mut cal = NormalizedCalibration::default();
                        cal.set_playfield_inset(inset);
                        if let Some(bounds) = r {
                            cal.set_rails(bounds);
                        }
                        let g = model.derive(&cal, viewport, aspect).geometry;
                        assert!(
                            g.table_rect.contains_rect(&g.playfield_rect),
                            "playfield {:?} escapes table {:?}",
                            g.playfield_rect,
                            g.table_rect
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn derivation_is_idempotent() {
        let mut cal = NormalizedCalibration::empty();
        cal.set_pocket(PocketId::Tl, NormalizedPoint::new(0.07, 0.9));
        let model = PlayfieldModel::default();
        let a = model.derive(&cal, Vec2::new(1179.0, 2556.0), 1.9);
        let b = model.derive(&cal, Vec2::new(1179.0, 2556.0), 1.9);
        assert_eq!(a, b);
        assert_eq!(a.geometry.table_rect.min.to_array(), b.geometry.table_rect.min.to_array());
    }

    #[test]
    fn missing_pockets_are_seeded_into_returned_calibration() {
        let cal = NormalizedCalibration::empty();
        let d = PlayfieldModel::default().derive(&cal, Vec2::new(1000.0, 500.0), 2.0);
        assert!(d.seeded);
        assert_eq!(d.calibration.pockets.len(), 6);
        assert_eq!(d.geometry.pockets.len(), 6);
        let ids: Vec<PocketId> = d.geometry.pockets.iter().map(|p| p.id).collect();
        assert_eq!(ids, PocketId::ALL.to_vec());
        // Bottom-middle default sits at x = 0.5 of the table
        let bm = d.geometry.pocket(PocketId::Bm).unwrap();
        assert!((bm.center.x - 500.0).abs() < 1e-3);
        // Input untouched
        assert!(cal.pockets.is_empty());
    }

    #[test]
    fn rails_follow_playfield_edges() {
        let g = derive_default(Vec2::new(1000.0, 500.0), 2.0).geometry;
        let top = g.rail(RailId::Top);
        assert_eq!(top.p0, g.playfield_rect.top_left());
        assert_eq!(top.p1, g.playfield_rect.top_right());
        let left = g.rail(RailId::Left);
        assert_eq!(left.p0, g.playfield_rect.bottom_left());
        assert_eq!(left.p1, g.playfield_rect.top_left());
    }

    #[test]
    fn pocket_and_rail_hit_testing() {
        let g = derive_default(Vec2::new(1000.0, 500.0), 2.0).geometry;
        let tm = g.pocket(PocketId::Tm).unwrap().center;
        assert_eq!(g.pocket_at(tm + Vec2::new(5.0, -5.0), 2.0), Some(PocketId::Tm));
        assert_eq!(g.pocket_at(g.playfield_rect.center(), 2.0), None);

        assert_eq!(g.rail_at(Vec2::new(300.0, 455.0)), Some(RailId::Top));
        assert_eq!(g.rail_at(Vec2::new(45.0, 250.0)), Some(RailId::Left));
        assert_eq!(g.rail_at(g.playfield_rect.center()), None);
    }

    #[test]
    fn rail_hits_stop_at_playfield_corners() {
        // Playfield (40,40)-(960,460), reach 40
        let g = derive_default(Vec2::new(1000.0, 500.0), 2.0).geometry;
        assert_eq!(g.rail_at(Vec2::new(30.0, 30.0)), None);
        assert_eq!(g.rail_at(Vec2::new(970.0, 470.0)), None);
        assert_eq!(g.rail_at(Vec2::new(30.0, 250.0)), Some(RailId::Left));
        assert_eq!(g.rail_at(Vec2::new(500.0, 30.0)), Some(RailId::Bottom));
        // Inside a corner both rails qualify; the nearer wins
        assert_eq!(g.rail_at(Vec2::new(45.0, 60.0)), Some(RailId::Left));
    }
}
