use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::table::playfield::TableGeometry;

/// Which ball is being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallKind {
    Cue,
    Object,
}

impl BallKind {
    pub fn other(self) -> Self {
        match self {
            BallKind::Cue => BallKind::Object,
            BallKind::Object => BallKind::Cue,
        }
    }
}

/// Keeps ball positions legal: inside the playfield, clear of pocket
/// mouths, not overlapping the other ball.
///
/// This is a single correction pass in a fixed order, not a relaxation to
/// convergence. A late step can push a point back across an earlier
/// constraint near a corner; the final clamp keeps it on the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSolver {
    /// Extra pocket clearance in ball radii.
    pub pocket_clearance: f32,
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self {
            pocket_clearance: 0.9,
        }
    }
}

impl ConstraintSolver {
    /// Nearest legal centre for the ball being placed.
    /// `other_ball` is the other ball's centre, if it has been placed.
    pub fn nearest_legal_point(
        &self,
        desired: Vec2,
        placing: BallKind,
        geometry: &TableGeometry,
        other_ball: Option<Vec2>,
    ) -> Vec2 {
        let area = geometry.legal_area();
        let mut point = area.clamp_point(desired);

        // Pocket mouths, in fixed pocket order
        let clearance = geometry.pocket_radius + self.pocket_clearance * geometry.ball_radius;
        for pocket in &geometry.pockets {
            let offset = point - pocket.center;
            let dist = offset.length();
            if dist < clearance && dist > f32::EPSILON {
                point = pocket.center + offset / dist * clearance;
            }
        }

        if let Some(other) = other_ball {
            let min_dist = 2.0 * geometry.ball_radius;
            let offset = point - other;
            let dist = offset.length();
            if dist < min_dist {
                // Coincident centres have no direction; push along +x
                let dir = if dist > f32::EPSILON { offset / dist } else { Vec2::X };
                point = other + dir * min_dist;
            }
        }

        let legal = area.clamp_point(point);
        if legal != desired {
            log::debug!("{:?} ball moved from {:?} to legal {:?}", placing, desired, legal);
        }
        legal
    }
}
