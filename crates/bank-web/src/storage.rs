use bank_engine::calibration::record;
use bank_engine::{CalibrationStore, NormalizedCalibration};
use web_sys::Storage;

/// Calibration persisted in the browser's `localStorage` under one key.
///
/// Storage may be unavailable (private browsing, disabled cookies); loads
/// then return None and saves are logged and dropped.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("localStorage unavailable: {:?}", e);
                None
            }
        }
    }
}

impl CalibrationStore for LocalStorageStore {
    fn load(&self) -> Option<NormalizedCalibration> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => record::decode_or_warn(&raw),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Reading {} failed: {:?}", self.key, e);
                None
            }
        }
    }

    fn save(&mut self, calibration: &NormalizedCalibration) {
        let json = match record::encode(calibration) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Calibration not saved: {}", e);
                return;
            }
        };
        let Some(storage) = Self::storage() else {
            log::warn!("Calibration not saved: no localStorage");
            return;
        };
        if let Err(e) = storage.set_item(&self.key, &json) {
            log::warn!("Writing {} failed: {:?}", self.key, e);
        }
    }
}
