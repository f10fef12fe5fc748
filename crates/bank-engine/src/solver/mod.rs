pub mod bank;
pub mod placement;

pub use bank::{BankShot, BankShotSolver, Trajectory};
pub use placement::{BallKind, ConstraintSolver};
