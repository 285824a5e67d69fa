//! Procedural setup: terrain synthesis, formations, randomized placement.

pub mod formation;
pub mod terrain;

pub use formation::{
    apply_classical, mirror_board, randomize_terrain, randomize_units, reset_terrain, reset_units,
};
pub use terrain::{apply_generated, generate, Symmetry, TerrainGrid};
