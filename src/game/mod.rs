//! Match lifecycle: pure move application and the turn/phase controller.

pub mod apply;
pub mod controller;

pub use apply::{apply_move, desert_sweep, AppliedMove, DesertSweep};
pub use controller::{
    Match, MatchPhase, MoveError, MoveReceipt, SetupError, Snapshot, Verdict, VictoryReason,
};
