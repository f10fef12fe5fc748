//! Single-cushion bank shots by the mirror method.
//!
//! The pocket is reflected across the rail line; the straight line from the
//! object ball to the mirrored pocket crosses the rail at the bounce point.

use glam::Vec2;
use serde::Serialize;

use crate::core::geometry::{ray_segment_intersection, reflect_across_line};
use crate::table::rail::RailSegment;

/// Geometric solution before the plausibility filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankShot {
    pub bounce_point: Vec2,
    /// The pocket reflected across the rail line.
    pub mirrored_pocket: Vec2,
}

/// A plausible bank, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    /// Cue ball centre to the ghost-ball contact position.
    pub cue_aim_segment: [Vec2; 2],
    /// Object ball → bounce point → pocket.
    pub object_bank_polyline: Vec<Vec2>,
    pub bounce_point: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankShotSolver {
    /// Degenerate rail / parallel ray threshold.
    pub degenerate_epsilon: f32,
    /// Minimum |cos| between each leg and the rail normal.
    pub plausibility_epsilon: f32,
}

impl Default for BankShotSolver {
    fn default() -> Self {
        Self {
            degenerate_epsilon: 1e-6,
            plausibility_epsilon: 0.02,
        }
    }
}

impl BankShotSolver {
    /// Mirror `pocket` across the rail and intersect the object-ball ray with
    /// the finite rail. None for a degenerate rail, a parallel ray, or a hit
    /// outside the rail or behind the ball.
    pub fn solve_single_rail_bank(
        &self,
        object: Vec2,
        pocket: Vec2,
        rail: &RailSegment,
    ) -> Option<BankShot> {
        let mirrored_pocket = reflect_across_line(pocket, rail.p0, rail.p1, self.degenerate_epsilon)?;
        let bounce_point = ray_segment_intersection(
            object,
            mirrored_pocket,
            rail.p0,
            rail.p1,
            self.degenerate_epsilon,
        )?;
        Some(BankShot {
            bounce_point,
            mirrored_pocket,
        })
    }

    /// The ball must travel into the cushion and leave it back into the table.
    /// Rejects solutions that are geometrically valid but physically backwards.
    pub fn is_plausible(&self, object: Vec2, bounce_point: Vec2, pocket: Vec2, inward_normal: Vec2) -> bool {
        let (Some(v_in), Some(v_out)) = (
            (bounce_point - object).try_normalize(),
            (pocket - bounce_point).try_normalize(),
        ) else {
            return false;
        };
        v_in.dot(inward_normal) < -self.plausibility_epsilon
            && v_out.dot(inward_normal) > self.plausibility_epsilon
    }

    /// Solve, filter, and build the display trajectory.
    pub fn plan(
        &self,
        cue: Vec2,
        object: Vec2,
        pocket: Vec2,
        rail: &RailSegment,
        ball_radius: f32,
    ) -> Option<Trajectory> {
        let shot = self.solve_single_rail_bank(object, pocket, rail)?;
        if !self.is_plausible(object, shot.bounce_point, pocket, rail.inward_normal()) {
            log::debug!("Bank off {:?} rejected as implausible", rail.id);
            return None;
        }

        let v_in = (shot.bounce_point - object).normalize_or_zero();
        let ghost_ball = object - v_in * 2.0 * ball_radius;
        Some(Trajectory {
            cue_aim_segment: [cue, ghost_ball],
            object_bank_polyline: vec![object, shot.bounce_point, pocket],
            bounce_point: shot.bounce_point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::rail::RailId;

    fn top_rail() -> RailSegment {
        RailSegment::new(RailId::Top, Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0))
    }

    #[test]
    fn top_rail_bank_is_accepted() {
        let solver = BankShotSolver::default();
        let object = Vec2::new(20.0, 10.0);
        let pocket = Vec2::new(180.0, 10.0);
        let rail = top_rail();

        let shot = solver.solve_single_rail_bank(object, pocket, &rail).unwrap();
        assert!((shot.mirrored_pocket - Vec2::new(180.0, 190.0)).length() < 1e-4);
        assert!((shot.bounce_point.y - 100.0).abs() < 1e-4);
        assert!(shot.bounce_point.x >= 0.0 && shot.bounce_point.x <= 200.0);
        assert!((shot.bounce_point.x - 100.0).abs() < 1e-3);

        let n = rail.inward_normal();
        let v_in = (shot.bounce_point - object).normalize();
        let v_out = (pocket - shot.bounce_point).normalize();
        assert!(v_in.dot(n) < 0.0);
        assert!(v_out.dot(n) > 0.0);
        assert!(solver.is_plausible(object, shot.bounce_point, pocket, n));
    }

    #[test]
    fn bounce_outside_rail_extent_is_none() {
        let solver = BankShotSolver::default();
        // The mirror ray crosses y = 100 far left of the segment
        let object = Vec2::new(-400.0, 90.0);
        let pocket = Vec2::new(180.0, 10.0);
        assert!(solver.solve_single_rail_bank(object, pocket, &top_rail()).is_none());
    }

    #[test]
    fn zero_length_rail_is_none() {
        let solver = BankShotSolver::default();
        let p = Vec2::new(50.0, 100.0);
        let rail = RailSegment::new(RailId::Top, p, p);
        assert!(solver
            .solve_single_rail_bank(Vec2::new(20.0, 10.0), Vec2::new(180.0, 10.0), &rail)
            .is_none());
    }

    #[test]
    fn ray_parallel_to_rail_is_none() {
        let solver = BankShotSolver::default();
        // Object ball on the mirrored pocket's horizontal line would need a
        // parallel ray; place both on the rail line itself.
        let rail = top_rail();
        let object = Vec2::new(-50.0, 100.0);
        let pocket = Vec2::new(250.0, 100.0);
        assert!(solver.solve_single_rail_bank(object, pocket, &rail).is_none());
    }

    #[test]
    fn balls_behind_cushion_are_implausible() {
        let solver = BankShotSolver::default();
        // Both beyond the rail: geometrically solvable, physically backwards
        let object = Vec2::new(20.0, 190.0);
        let pocket = Vec2::new(180.0, 190.0);
        let rail = top_rail();
        let shot = solver.solve_single_rail_bank(object, pocket, &rail).unwrap();
        assert!(!solver.is_plausible(object, shot.bounce_point, pocket, rail.inward_normal()));
        assert!(solver.plan(Vec2::ZERO, object, pocket, &rail, 5.0).is_none());
    }

    #[test]
    fn grazing_path_is_rejected() {
        let solver = BankShotSolver::default();
        let rail = top_rail();
        // Nearly parallel to the cushion: |cos| ≈ 0.01 < 0.02
        let object = Vec2::new(0.5, 99.0);
        let pocket = Vec2::new(199.5, 99.0);
        let shot = solver.solve_single_rail_bank(object, pocket, &rail).unwrap();
        assert!(!solver.is_plausible(object, shot.bounce_point, pocket, rail.inward_normal()));
    }

    #[test]
    fn pocket_on_bounce_point_is_implausible() {
        let solver = BankShotSolver::default();
        let b = Vec2::new(100.0, 100.0);
        assert!(!solver.is_plausible(Vec2::new(20.0, 10.0), b, b, Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn plan_builds_polyline_and_ghost_ball() {
        let solver = BankShotSolver::default();
        let cue = Vec2::new(20.0, 60.0);
        let object = Vec2::new(20.0, 10.0);
        let pocket = Vec2::new(180.0, 10.0);
        let t = solver.plan(cue, object, pocket, &top_rail(), 5.0).unwrap();

        assert_eq!(t.object_bank_polyline.len(), 3);
        assert_eq!(t.object_bank_polyline[0], object);
        assert_eq!(t.object_bank_polyline[2], pocket);
        assert_eq!(t.object_bank_polyline[1], t.bounce_point);
        assert_eq!(t.cue_aim_segment[0], cue);

        // Ghost ball sits two radii behind the object ball, opposite the bounce
        let ghost = t.cue_aim_segment[1];
        assert!((ghost.distance(object) - 10.0).abs() < 1e-4);
        let v_in = (t.bounce_point - object).normalize();
        assert!((object - ghost).normalize().dot(v_in) > 0.999);
    }

    #[test]
    fn left_rail_bank() {
        let solver = BankShotSolver::default();
        let rail = RailSegment::new(RailId::Left, Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0));
        let object = Vec2::new(50.0, 20.0);
        let pocket = Vec2::new(50.0, 80.0);
        let t = solver.plan(Vec2::new(90.0, 20.0), object, pocket, &rail, 2.0).unwrap();
        assert!((t.bounce_point - Vec2::new(0.0, 50.0)).length() < 1e-4);
    }
}
