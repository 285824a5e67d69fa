//! Terrachess engine library.
//!
//! Exposes the board representation, move generation, procedural setup
//! tools, the match controller, and the local AI for use by UI and network
//! layers and by the integration tests.

pub mod board;
pub mod eval;
pub mod game;
pub mod gen;
pub mod movegen;
pub mod search;
