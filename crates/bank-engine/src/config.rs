use serde::{Deserialize, Serialize};

use crate::calibration::record::CALIBRATION_KEY;
use crate::solver::bank::BankShotSolver;
use crate::solver::placement::ConstraintSolver;
use crate::table::playfield::PlayfieldModel;

/// Tunable constants for the trainer, provided by the host.
/// Every field has a default; a JSON override only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainerConfig {
    /// Ball radius as a fraction of the playfield's shorter side (default: 0.0265).
    pub ball_radius_fraction: f32,
    /// Cushion thickness as a fraction of the table's shorter side when rails are calibrated (default: 0.06).
    pub cushion_fraction: f32,
    /// Lower bound for the calibrated cushion thickness in viewport units (default: 10).
    pub min_cushion_thickness: f32,
    /// Extra pocket clearance in ball radii; a ball centre may not come closer
    /// than `pocket_radius + pocket_clearance * ball_radius` to a pocket (default: 0.9).
    pub pocket_clearance: f32,
    /// Minimum |cos| between a bank path and the rail normal (default: 0.02).
    pub plausibility_epsilon: f32,
    /// Threshold for degenerate rails and parallel rays (default: 1e-6).
    pub degenerate_epsilon: f32,
    /// Maximum number of selected rails (default: 3).
    pub max_rails: usize,
    /// A tap selects a pocket within `pocket_hit_slop * pocket_radius` of its centre (default: 2.0).
    pub pocket_hit_slop: f32,
    /// Storage key for the persisted calibration record.
    pub storage_key: String,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            ball_radius_fraction: 0.0265,
            cushion_fraction: 0.06,
            min_cushion_thickness: 10.0,
            pocket_clearance: 0.9,
            plausibility_epsilon: 0.02,
            degenerate_epsilon: 1e-6,
            max_rails: 3,
            pocket_hit_slop: 2.0,
            storage_key: CALIBRATION_KEY.to_string(),
        }
    }
}

impl TrainerConfig {
    /// Parse a config override from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn playfield_model(&self) -> PlayfieldModel {
        PlayfieldModel {
            ball_radius_fraction: self.ball_radius_fraction,
            cushion_fraction: self.cushion_fraction,
            min_cushion_thickness: self.min_cushion_thickness,
        }
    }

    pub fn constraint_solver(&self) -> ConstraintSolver {
        ConstraintSolver {
            pocket_clearance: self.pocket_clearance,
        }
    }

    pub fn bank_solver(&self) -> BankShotSolver {
        BankShotSolver {
            degenerate_epsilon: self.degenerate_epsilon,
            plausibility_epsilon: self.plausibility_epsilon,
        }
    }
}
