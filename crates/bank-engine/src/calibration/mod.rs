pub mod model;
pub mod record;
pub mod store;

pub use model::{NormalizedCalibration, NormalizedPoint, PocketId, RailBounds};
pub use record::{CalibrationError, CalibrationRecord, CALIBRATION_KEY};
pub use store::{CalibrationStore, MemoryStore};
