pub mod playfield;
pub mod rail;

pub use playfield::{Derivation, PlayfieldModel, PocketCenter, TableGeometry};
pub use rail::{RailId, RailSegment};
