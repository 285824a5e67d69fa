//! Position evaluation.
//!
//! Scores a board position from a given player's perspective, considering
//! material, centralization, check, and endgame king-hunt factors.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, role_value, WIN_SCORE};
