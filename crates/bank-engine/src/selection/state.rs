use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::calibration::model::PocketId;
use crate::solver::placement::BallKind;
use crate::table::rail::RailId;

/// Interaction mode. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Mode {
    #[default]
    PlaceCue = 0,
    PlaceObject = 1,
    SelectPocket = 2,
    SelectRails = 3,
}

impl Mode {
    /// Convert from a u8 value (bridge encoding). None if out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::PlaceCue),
            1 => Some(Self::PlaceObject),
            2 => Some(Self::SelectPocket),
            3 => Some(Self::SelectRails),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The ball this mode places, if any.
    pub fn placing(self) -> Option<BallKind> {
        match self {
            Mode::PlaceCue => Some(BallKind::Cue),
            Mode::PlaceObject => Some(BallKind::Object),
            Mode::SelectPocket | Mode::SelectRails => None,
        }
    }
}

/// Chosen pocket and ordered chosen rails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pocket: Option<PocketId>,
    rails: Vec<RailId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pocket(&self) -> Option<PocketId> {
        self.pocket
    }

    /// Selected rails in selection order.
    pub fn rails(&self) -> &[RailId] {
        &self.rails
    }

    /// Select `id`, or deselect it if it is already selected.
    pub fn toggle_pocket(&mut self, id: PocketId) {
        self.pocket = if self.pocket == Some(id) { None } else { Some(id) };
    }

    /// Remove `rail` if selected, otherwise append it unless `capacity` is reached.
    /// Returns whether the selection changed.
    pub fn toggle_rail(&mut self, rail: RailId, capacity: usize) -> bool {
        if let Some(idx) = self.rails.iter().position(|&r| r == rail) {
            self.rails.remove(idx);
            true
        } else if self.rails.len() < capacity {
            self.rails.push(rail);
            true
        } else {
            false
        }
    }

    /// Returns whether anything was cleared.
    pub fn clear_rails(&mut self) -> bool {
        let changed = !self.rails.is_empty();
        self.rails.clear();
        changed
    }

    pub fn clear(&mut self) {
        self.pocket = None;
        self.rails.clear();
    }

    /// The pocket and rail of a single-cushion bank: one pocket and exactly one rail.
    pub fn single_bank(&self) -> Option<(PocketId, RailId)> {
        match (self.pocket, self.rails.as_slice()) {
            (Some(pocket), [rail]) => Some((pocket, *rail)),
            _ => None,
        }
    }
}

/// Cue and object ball centres in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallState {
    pub cue: Vec2,
    pub object: Vec2,
}

impl BallState {
    pub fn get(&self, kind: BallKind) -> Vec2 {
        match kind {
            BallKind::Cue => self.cue,
            BallKind::Object => self.object,
        }
    }

    pub fn set(&mut self, kind: BallKind, pos: Vec2) {
        match kind {
            BallKind::Cue => self.cue = pos,
            BallKind::Object => self.object = pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourth_rail_is_ignored() {
        let mut sel = SelectionState::new();
        assert!(sel.toggle_rail(RailId::Left, 3));
        assert!(sel.toggle_rail(RailId::Top, 3));
        assert!(sel.toggle_rail(RailId::Right, 3));
        assert!(!sel.toggle_rail(RailId::Bottom, 3));
        assert_eq!(sel.rails(), &[RailId::Left, RailId::Top, RailId::Right]);
    }

    #[test]
    fn toggling_selected_rail_removes_it_in_place() {
        let mut sel = SelectionState::new();
        sel.toggle_rail(RailId::Left, 3);
        sel.toggle_rail(RailId::Top, 3);
        sel.toggle_rail(RailId::Right, 3);
        assert!(sel.toggle_rail(RailId::Top, 3));
        assert_eq!(sel.rails(), &[RailId::Left, RailId::Right]);
        // Room again after removal
        assert!(sel.toggle_rail(RailId::Bottom, 3));
        assert_eq!(sel.rails(), &[RailId::Left, RailId::Right, RailId::Bottom]);
    }

    #[test]
    fn single_bank_needs_pocket_and_exactly_one_rail() {
        let mut sel = SelectionState::new();
        assert!(sel.single_bank().is_none());
        sel.toggle_rail(RailId::Bottom, 3);
        assert!(sel.single_bank().is_none());
        sel.toggle_pocket(PocketId::Tr);
        assert_eq!(sel.single_bank(), Some((PocketId::Tr, RailId::Bottom)));
        sel.toggle_rail(RailId::Left, 3);
        assert!(sel.single_bank().is_none());
    }

    #[test]
    fn toggle_pocket_deselects_same_pocket() {
        let mut sel = SelectionState::new();
        sel.toggle_pocket(PocketId::Bm);
        sel.toggle_pocket(PocketId::Tl);
        assert_eq!(sel.pocket(), Some(PocketId::Tl));
        sel.toggle_pocket(PocketId::Tl);
        assert_eq!(sel.pocket(), None);
    }

    #[test]
    fn clear_rails_keeps_pocket() {
        let mut sel = SelectionState::new();
        sel.toggle_pocket(PocketId::Br);
        sel.toggle_rail(RailId::Top, 3);
        assert!(sel.clear_rails());
        assert!(!sel.clear_rails());
        assert_eq!(sel.pocket(), Some(PocketId::Br));
        sel.clear();
        assert_eq!(sel, SelectionState::new());
    }

    #[test]
    fn mode_round_trip_u8() {
        for v in 0..4u8 {
            assert_eq!(Mode::from_u8(v).unwrap().as_u8(), v);
        }
        assert!(Mode::from_u8(4).is_none());
        assert_eq!(Mode::default(), Mode::PlaceCue);
        assert_eq!(Mode::PlaceObject.placing(), Some(BallKind::Object));
        assert_eq!(Mode::SelectRails.placing(), None);
    }
}
