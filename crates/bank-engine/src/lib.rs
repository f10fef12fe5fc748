pub mod api;
pub mod bridge;
pub mod calibration;
pub mod config;
pub mod core;
pub mod input;
pub mod selection;
pub mod solver;
pub mod table;

// Re-export key types at crate root for convenience
pub use api::trainer::{HapticHook, Trainer};
pub use bridge::snapshot::{RailView, SceneSnapshot};
pub use calibration::model::{NormalizedCalibration, NormalizedPoint, PocketId, RailBounds};
pub use calibration::record::{CalibrationError, CALIBRATION_KEY};
pub use calibration::store::{CalibrationStore, MemoryStore};
pub use config::TrainerConfig;
pub use core::geometry::Rect;
pub use input::queue::{InputEvent, InputQueue};
pub use selection::controller::SelectionController;
pub use selection::state::{BallState, Mode, SelectionState};
pub use solver::bank::{BankShot, BankShotSolver, Trajectory};
pub use solver::placement::{BallKind, ConstraintSolver};
pub use table::playfield::{Derivation, PlayfieldModel, PocketCenter, TableGeometry};
pub use table::rail::{RailId, RailSegment};
