use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::geometry::Rect;

/// One of the four cushions. Viewport space is y-up, so `Top` is the
/// playfield's maximum-y edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RailId {
    Top,
    Bottom,
    Left,
    Right,
}

impl RailId {
    pub const ALL: [RailId; 4] = [RailId::Top, RailId::Bottom, RailId::Left, RailId::Right];

    /// Unit vector pointing from the cushion back into the playfield.
    pub fn inward_normal(self) -> Vec2 {
        match self {
            RailId::Top => Vec2::new(0.0, -1.0),
            RailId::Bottom => Vec2::new(0.0, 1.0),
            RailId::Left => Vec2::new(1.0, 0.0),
            RailId::Right => Vec2::new(-1.0, 0.0),
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert from a u8 value (bridge encoding). None if out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A cushion edge of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RailSegment {
    pub id: RailId,
    pub p0: Vec2,
    pub p1: Vec2,
}

impl RailSegment {
    pub fn new(id: RailId, p0: Vec2, p1: Vec2) -> Self {
        Self { id, p0, p1 }
    }

    /// The edge of `playfield` that carries this rail.
    pub fn on_playfield(id: RailId, playfield: &Rect) -> Self {
        match id {
            RailId::Top => Self::new(id, playfield.top_left(), playfield.top_right()),
            RailId::Bottom => Self::new(id, playfield.bottom_left(), playfield.bottom_right()),
            RailId::Left => Self::new(id, playfield.bottom_left(), playfield.top_left()),
            RailId::Right => Self::new(id, playfield.bottom_right(), playfield.top_right()),
        }
    }

    pub fn inward_normal(&self) -> Vec2 {
        self.id.inward_normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_point_into_playfield() {
        let playfield = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(200.0, 100.0));
        let center = playfield.center();
        for id in RailId::ALL {
            let rail = RailSegment::on_playfield(id, &playfield);
            let to_center = center - (rail.p0 + rail.p1) * 0.5;
            assert!(to_center.dot(rail.inward_normal()) > 0.0, "{:?} normal faces out", id);
            assert!((rail.inward_normal().length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn top_rail_runs_along_max_y() {
        let playfield = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(210.0, 120.0));
        let top = RailSegment::on_playfield(RailId::Top, &playfield);
        assert_eq!(top.p0, Vec2::new(10.0, 120.0));
        assert_eq!(top.p1, Vec2::new(210.0, 120.0));
    }

    #[test]
    fn rail_id_round_trip_u8() {
        for id in RailId::ALL {
            assert_eq!(RailId::from_u8(id.as_u8()), Some(id));
            assert_eq!(RailId::ALL[id.index()], id);
        }
        assert!(RailId::from_u8(4).is_none());
    }
}
