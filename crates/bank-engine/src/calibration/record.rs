//! Versioned on-disk form of the calibration.
//!
//! The record tolerates any subset of rail bounds; only a complete set of
//! four survives decoding, anything less is treated as "no rails".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{NormalizedCalibration, NormalizedPoint, PocketId, RailBounds};

/// Storage key for the single persisted calibration record.
pub const CALIBRATION_KEY: &str = "PoolBankTrainer.Calibration.v1";

/// Record format version written by this build.
pub const RECORD_VERSION: u32 = 1;

/// Errors from decoding or encoding a calibration record.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("malformed calibration record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported calibration record version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Serialized calibration as it appears in storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub playfield_inset: f32,
    pub pocket_radius: f32,
    #[serde(default)]
    pub pockets: BTreeMap<PocketId, NormalizedPoint>,
    #[serde(default)]
    pub rails: RailRecord,
}

/// Rail bounds as stored; each may be absent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RailRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
}

fn default_version() -> u32 {
    RECORD_VERSION
}

impl RailRecord {
    /// All four bounds, or None if any is missing.
    pub fn complete(&self) -> Option<RailBounds> {
        Some(RailBounds {
            top: self.top?,
            bottom: self.bottom?,
            left: self.left?,
            right: self.right?,
        })
    }
}

impl From<Option<RailBounds>> for RailRecord {
    fn from(bounds: Option<RailBounds>) -> Self {
        match bounds {
            Some(b) => Self {
                top: Some(b.top),
                bottom: Some(b.bottom),
                left: Some(b.left),
                right: Some(b.right),
            },
            None => Self::default(),
        }
    }
}

impl From<&NormalizedCalibration> for CalibrationRecord {
    fn from(cal: &NormalizedCalibration) -> Self {
        Self {
            version: RECORD_VERSION,
            playfield_inset: cal.playfield_inset,
            pocket_radius: cal.pocket_radius,
            pockets: cal.pockets.clone(),
            rails: cal.rails.into(),
        }
    }
}

impl From<CalibrationRecord> for NormalizedCalibration {
    fn from(record: CalibrationRecord) -> Self {
        Self {
            playfield_inset: record.playfield_inset,
            pocket_radius: record.pocket_radius,
            pockets: record.pockets,
            rails: record.rails.complete(),
        }
    }
}

/// Decode a stored record. Values are clamped on read.
pub fn decode(json: &str) -> Result<NormalizedCalibration, CalibrationError> {
    let record: CalibrationRecord = serde_json::from_str(json)?;
    if record.version != RECORD_VERSION {
        return Err(CalibrationError::UnsupportedVersion {
            found: record.version,
            expected: RECORD_VERSION,
        });
    }
    Ok(NormalizedCalibration::from(record).sanitized())
}

pub fn encode(cal: &NormalizedCalibration) -> Result<String, CalibrationError> {
    Ok(serde_json::to_string(&CalibrationRecord::from(cal))?)
}

/// Decode a raw stored value, logging and discarding failures.
pub fn decode_or_warn(raw: &str) -> Option<NormalizedCalibration> {
    match decode(raw) {
        Ok(cal) => Some(cal),
        Err(e) => {
            log::warn!("Ignoring stored calibration: {}", e);
            None
        }
    }
}
