//! Move selection for the computer players.

pub mod minimax;

pub use minimax::{choose_move, search, SearchResult, DEFAULT_DEPTH};
