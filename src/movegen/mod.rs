//! Legal move generation.
//!
//! Per-role pseudo-legal rules modified by terrain, the recursive attack
//! probe behind the Leader's guarded two-step, the check oracle, and the
//! top-level self-check legality filter.

pub mod check;
pub mod moves;

pub use check::{has_any_legal_move, in_check, legal_move_pairs};
pub use moves::{cell_attacked, moves_of};
