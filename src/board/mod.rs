//! Board representation and game-state types.
//!
//! Contains the core data structures for cells, pieces, terrain, territory
//! geometry, inventories, and the overall board state.

pub mod cell;
pub mod piece;
pub mod state;
pub mod terrain;
pub mod territory;

pub use cell::{Cell, AROUND, BOARD_SIZE, DIAGONAL, KNIGHT, ORTHOGONAL};
pub use piece::{Piece, Player, Role, ALL_PLAYERS, ALL_ROLES, PLAYER_COUNT, ROLE_COUNT};
pub use state::{BoardState, Inventory};
pub use terrain::{Terrain, ALL_TERRAIN, PLACEABLE_TERRAIN, TERRAIN_COUNT};
pub use territory::Mode;
