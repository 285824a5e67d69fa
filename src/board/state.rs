//! Board state representation.
//!
//! Holds the complete snapshot of a match at a point in time: the piece
//! grid, the parallel terrain grid, per-player unplaced inventories, the
//! geometry mode, and the list of still-active players.
//!
//! Uses fixed-size 12x12 arrays for O(1) lookup; the state is cheap to
//! clone, which the legality filter and the background search rely on.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, BOARD_SIZE};
use super::piece::{Piece, Player, Role, ALL_ROLES, PLAYER_COUNT, ROLE_COUNT};
use super::terrain::{Terrain, PLACEABLE_TERRAIN, TERRAIN_COUNT};
use super::territory::Mode;

const N: usize = BOARD_SIZE as usize;

/// A player's unplaced pieces and terrain, consumed during setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pieces: [u8; ROLE_COUNT],
    terrain: [u8; TERRAIN_COUNT],
}

impl Inventory {
    /// The full canonical roster plus a balanced terrain pool for the
    /// mode's quota (quota/4 of each non-Flat kind).
    pub fn full(mode: Mode) -> Inventory {
        let mut inv = Inventory::empty();
        for role in ALL_ROLES {
            inv.pieces[role as usize] = role.roster_count();
        }
        let per_kind = (mode.terrain_quota() / PLACEABLE_TERRAIN.len()) as u8;
        for kind in PLACEABLE_TERRAIN {
            inv.terrain[kind as usize] = per_kind;
        }
        inv
    }

    pub fn empty() -> Inventory {
        Inventory {
            pieces: [0; ROLE_COUNT],
            terrain: [0; TERRAIN_COUNT],
        }
    }

    pub fn piece_count(&self, role: Role) -> u8 {
        self.pieces[role as usize]
    }

    pub fn terrain_count(&self, kind: Terrain) -> u8 {
        self.terrain[kind as usize]
    }

    /// Removes one piece of the role. Returns false if none remain.
    pub fn take_piece(&mut self, role: Role) -> bool {
        if self.pieces[role as usize] == 0 {
            return false;
        }
        self.pieces[role as usize] -= 1;
        true
    }

    pub fn return_piece(&mut self, role: Role) {
        self.pieces[role as usize] += 1;
    }

    /// Removes one terrain unit of the kind. Returns false if none remain.
    pub fn take_terrain(&mut self, kind: Terrain) -> bool {
        if kind == Terrain::Flat || self.terrain[kind as usize] == 0 {
            return false;
        }
        self.terrain[kind as usize] -= 1;
        true
    }

    pub fn return_terrain(&mut self, kind: Terrain) {
        if kind != Terrain::Flat {
            self.terrain[kind as usize] += 1;
        }
    }

    pub fn pieces_empty(&self) -> bool {
        self.pieces.iter().all(|&c| c == 0)
    }

    pub fn terrain_empty(&self) -> bool {
        self.terrain.iter().all(|&c| c == 0)
    }

    pub fn clear_terrain(&mut self) {
        self.terrain = [0; TERRAIN_COUNT];
    }

    /// Restores the balanced terrain pool for the mode's quota.
    pub fn refill_terrain(&mut self, mode: Mode) {
        self.clear_terrain();
        let per_kind = (mode.terrain_quota() / PLACEABLE_TERRAIN.len()) as u8;
        for kind in PLACEABLE_TERRAIN {
            self.terrain[kind as usize] = per_kind;
        }
    }

    pub fn clear_pieces(&mut self) {
        self.pieces = [0; ROLE_COUNT];
    }
}

/// Complete board state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub mode: Mode,
    /// Piece at each cell, row-major. At most one piece per cell.
    pub pieces: [[Option<Piece>; N]; N],
    /// Terrain at each cell, row-major. Exactly one kind per cell.
    pub terrain: [[Terrain; N]; N],
    /// Players still in the match, in turn order.
    pub active: Vec<Player>,
    inventories: [Inventory; PLAYER_COUNT],
}

impl BoardState {
    /// Creates an empty all-Flat board with full inventories for the
    /// mode's players and empty inventories for unused seats.
    pub fn new(mode: Mode) -> BoardState {
        let mut inventories = [
            Inventory::empty(),
            Inventory::empty(),
            Inventory::empty(),
            Inventory::empty(),
        ];
        for &p in mode.players() {
            inventories[p as usize] = Inventory::full(mode);
        }
        BoardState {
            mode,
            pieces: [[None; N]; N],
            terrain: [[Terrain::Flat; N]; N],
            active: mode.players().to_vec(),
            inventories,
        }
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.pieces[cell.row as usize][cell.col as usize]
    }

    pub fn set_piece(&mut self, cell: Cell, piece: Option<Piece>) {
        self.pieces[cell.row as usize][cell.col as usize] = piece;
    }

    pub fn terrain_at(&self, cell: Cell) -> Terrain {
        self.terrain[cell.row as usize][cell.col as usize]
    }

    pub fn set_terrain(&mut self, cell: Cell, kind: Terrain) {
        self.terrain[cell.row as usize][cell.col as usize] = kind;
    }

    pub fn inventory(&self, player: Player) -> &Inventory {
        &self.inventories[player as usize]
    }

    pub fn inventory_mut(&mut self, player: Player) -> &mut Inventory {
        &mut self.inventories[player as usize]
    }

    pub fn is_active(&self, player: Player) -> bool {
        self.active.contains(&player)
    }

    /// Drops a player from the active rotation.
    pub fn eliminate(&mut self, player: Player) {
        self.active.retain(|&p| p != player);
    }

    /// Iterates all (cell, piece) pairs owned by the player.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::all().filter_map(move |c| {
            self.piece_at(c)
                .filter(|p| p.owner == player)
                .map(|p| (c, p))
        })
    }

    /// Locates the player's Leader, if it is still on the board.
    pub fn leader_cell(&self, player: Player) -> Option<Cell> {
        self.pieces_of(player)
            .find(|(_, p)| p.role == Role::Leader)
            .map(|(c, _)| c)
    }

    /// How many pieces of the role the player has on the board.
    pub fn placed_count(&self, player: Player, role: Role) -> u8 {
        self.pieces_of(player).filter(|(_, p)| p.role == role).count() as u8
    }

    /// Non-Flat terrain cells inside the player's own territory.
    pub fn placed_terrain_count(&self, player: Player) -> usize {
        self.mode
            .territory(player)
            .filter(|&c| self.terrain_at(c) != Terrain::Flat)
            .count()
    }

    /// Recomputes the player's piece inventory as roster minus placed.
    /// Used after wholesale edits such as board mirroring.
    pub fn recount_pieces(&mut self, player: Player) {
        let mut counts = [0u8; ROLE_COUNT];
        for role in ALL_ROLES {
            counts[role as usize] = role.roster_count().saturating_sub(self.placed_count(player, role));
        }
        self.inventories[player as usize].pieces = counts;
    }
}
