use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default playfield inset as a fraction of the table's shorter side.
pub const DEFAULT_PLAYFIELD_INSET: f32 = 0.08;
/// Default pocket radius as a fraction of the table's shorter side.
pub const DEFAULT_POCKET_RADIUS: f32 = 0.045;
/// Largest meaningful inset; anything above collapses the playfield.
pub const MAX_PLAYFIELD_INSET: f32 = 0.5;

/// One of the six pockets.
///
/// The declaration order (`tl, tm, tr, bl, bm, br`) is the fixed iteration
/// order used everywhere pockets are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PocketId {
    Tl,
    Tm,
    Tr,
    Bl,
    Bm,
    Br,
}

impl PocketId {
    pub const ALL: [PocketId; 6] = [
        PocketId::Tl,
        PocketId::Tm,
        PocketId::Tr,
        PocketId::Bl,
        PocketId::Bm,
        PocketId::Br,
    ];

    /// Seed position used when a calibration has no entry for this pocket.
    /// Corners sit ~8% in from the table corners, middles near the long edges.
    pub fn default_position(self) -> NormalizedPoint {
        match self {
            PocketId::Tl => NormalizedPoint::new(0.08, 0.92),
            PocketId::Tm => NormalizedPoint::new(0.5, 0.94),
            PocketId::Tr => NormalizedPoint::new(0.92, 0.92),
            PocketId::Bl => NormalizedPoint::new(0.08, 0.08),
            PocketId::Bm => NormalizedPoint::new(0.5, 0.06),
            PocketId::Br => NormalizedPoint::new(0.92, 0.08),
        }
    }

    /// Convert from a u8 value (bridge encoding). None if out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A table-relative coordinate. `(0,0)` is the table rect's bottom-left,
/// `(1,1)` its top-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both components clamped to `[0,1]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for NormalizedPoint {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Calibrated cushion lines. `top`/`bottom` are normalized y values,
/// `left`/`right` normalized x values.
///
/// Rails are all-or-none: a calibration either carries all four bounds or none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RailBounds {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl RailBounds {
    pub fn clamped(self) -> Self {
        Self {
            top: self.top.clamp(0.0, 1.0),
            bottom: self.bottom.clamp(0.0, 1.0),
            left: self.left.clamp(0.0, 1.0),
            right: self.right.clamp(0.0, 1.0),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite() && self.bottom.is_finite() && self.left.is_finite() && self.right.is_finite()
    }
}

/// Resolution-independent description of the table image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCalibration {
    /// Fallback playfield margin, as a fraction of the table's shorter side.
    pub playfield_inset: f32,
    /// Pocket radius, as a fraction of the table's shorter side.
    pub pocket_radius: f32,
    /// Pocket centres. Ordered by `PocketId`.
    pub pockets: BTreeMap<PocketId, NormalizedPoint>,
    /// Calibrated cushion lines; None means "use `playfield_inset`".
    pub rails: Option<RailBounds>,
}

impl Default for NormalizedCalibration {
    fn default() -> Self {
        Self {
            playfield_inset: DEFAULT_PLAYFIELD_INSET,
            pocket_radius: DEFAULT_POCKET_RADIUS,
            pockets: PocketId::ALL
                .iter()
                .map(|&id| (id, id.default_position()))
                .collect(),
            rails: None,
        }
    }
}

impl NormalizedCalibration {
    /// A calibration with no pockets and no rails, to be seeded on derivation.
    pub fn empty() -> Self {
        Self {
            pockets: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// Fill every missing pocket with its default position.
    /// Returns the seeded calibration and whether anything was added.
    pub fn seeded(&self) -> (Self, bool) {
        let mut seeded = self.clone();
        let mut changed = false;
        for id in PocketId::ALL {
            seeded.pockets.entry(id).or_insert_with(|| {
                changed = true;
                id.default_position()
            });
        }
        (seeded, changed)
    }

    /// Position of a pocket, falling back to its default.
    pub fn pocket(&self, id: PocketId) -> NormalizedPoint {
        self.pockets
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.default_position())
    }

    // -- Edits (clamped at write time) --

    pub fn set_pocket(&mut self, id: PocketId, point: NormalizedPoint) {
        if point.is_finite() {
            self.pockets.insert(id, point.clamped());
        }
    }

    /// Set all four cushion lines at once.
    pub fn set_rails(&mut self, bounds: RailBounds) {
        if bounds.is_finite() {
            self.rails = Some(bounds.clamped());
        }
    }

    pub fn clear_rails(&mut self) {
        self.rails = None;
    }

    pub fn set_playfield_inset(&mut self, inset: f32) {
        if inset.is_finite() {
            self.playfield_inset = inset.clamp(0.0, MAX_PLAYFIELD_INSET);
        }
    }

    pub fn set_pocket_radius(&mut self, radius: f32) {
        if radius.is_finite() {
            self.pocket_radius = radius.clamp(0.0, 1.0);
        }
    }

    /// Bring a calibration read from storage back into range.
    /// Non-finite values are replaced by defaults, everything else is clamped.
    pub fn sanitized(mut self) -> Self {
        self.playfield_inset = if self.playfield_inset.is_finite() {
            self.playfield_inset.clamp(0.0, MAX_PLAYFIELD_INSET)
        } else {
            DEFAULT_PLAYFIELD_INSET
        };
        self.pocket_radius = if self.pocket_radius.is_finite() {
            self.pocket_radius.clamp(0.0, 1.0)
        } else {
            DEFAULT_POCKET_RADIUS
        };
        for (id, point) in self.pockets.iter_mut() {
            *point = if point.is_finite() {
                point.clamped()
            } else {
                id.default_position()
            };
        }
        self.rails = self
            .rails
            .filter(RailBounds::is_finite)
            .map(RailBounds::clamped);
        self
    }
}
