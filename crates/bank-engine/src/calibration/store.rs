use super::model::NormalizedCalibration;
use super::record;

/// Persistence for the single calibration record.
///
/// `load` returns None when nothing usable is stored; callers substitute the
/// default calibration. `save` is fire-and-forget: a failed write is dropped.
pub trait CalibrationStore {
    fn load(&self) -> Option<NormalizedCalibration>;

    fn save(&mut self, calibration: &NormalizedCalibration);
}

/// In-memory store holding the serialized record.
/// Used by headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored record (possibly malformed).
    pub fn with_record(raw: impl Into<String>) -> Self {
        Self {
            record: Some(raw.into()),
            saves: 0,
        }
    }

    /// The raw record as last written.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CalibrationStore for MemoryStore {
    fn load(&self) -> Option<NormalizedCalibration> {
        self.record.as_deref().and_then(record::decode_or_warn)
    }

    fn save(&mut self, calibration: &NormalizedCalibration) {
        match record::encode(calibration) {
            Ok(json) => {
                self.record = Some(json);
                self.saves += 1;
            }
            Err(e) => log::warn!("Calibration not saved: {}", e),
        }
    }
}
