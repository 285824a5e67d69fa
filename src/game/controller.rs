//! The match controller: the single writer of game state.
//!
//! Owns the board and drives the `Menu -> Setup -> Combat -> Terminal`
//! state machine. Setup requests and combat moves are validated here and
//! rejected as no-ops when illegal; callers that want the reason can use
//! the `try_*` variants, everyone else diffs state through the `bool`
//! wrappers. Background searches work on snapshots and check staleness
//! against the ply counter when they finish.

use rand::Rng;
use thiserror::Error;

use crate::board::{BoardState, Cell, Mode, Piece, Player, Role, Terrain};
use crate::gen::{self, Symmetry};
use crate::movegen::{has_any_legal_move, moves_of};
use crate::search;

use super::apply::{apply_move, desert_sweep};

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Menu,
    Setup,
    Combat,
    Terminal,
}

/// Why the match ended with a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictoryReason {
    Capture,
    DesertElimination,
    Forfeit,
}

/// Terminal signal. `winner: None` is an explicit draw (no active player
/// had a legal move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Option<Player>,
    pub reason: Option<VictoryReason>,
}

/// Everything observable about one applied combat move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReceipt {
    pub from: Cell,
    pub to: Cell,
    pub captured: Option<Piece>,
    pub promoted: bool,
    /// Players eliminated this turn, by capture or by the desert.
    pub eliminated: Vec<Player>,
    /// Pieces the desert destroyed after the move.
    pub desert_losses: Vec<(Cell, Piece)>,
    /// Players passed over because they had no legal move.
    pub skipped: Vec<Player>,
}

/// Rejection reasons for setup requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("the match is not in its setup phase")]
    NotInSetup,
    #[error("that player is not seated in this match")]
    InactivePlayer,
    #[error("the cell is outside the player's territory")]
    OutsideTerritory,
    #[error("the cell is already occupied")]
    CellOccupied,
    #[error("the terrain does not admit that role")]
    IncompatibleTerrain,
    #[error("the inventory has none of that item left")]
    InventoryExhausted,
    #[error("nothing to remove at that cell")]
    NothingToRemove,
    #[error("flat terrain is not a placeable item")]
    FlatNotPlaceable,
}

/// Rejection reasons for combat moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the match is not in combat")]
    NotInCombat,
    #[error("no piece on the source cell")]
    EmptySource,
    #[error("the piece does not belong to the player to move")]
    NotYourPiece,
    #[error("the destination is not a legal move for that piece")]
    IllegalDestination,
}

/// An immutable copy of the position handed to background workers. A
/// result computed from it is only applied if the snapshot is still
/// current when it arrives.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: BoardState,
    pub mover: Player,
    ply: u64,
}

/// The authoritative match state and its sole mutator.
#[derive(Debug, Clone)]
pub struct Match {
    state: BoardState,
    phase: MatchPhase,
    mover: Option<Player>,
    verdict: Option<Verdict>,
    ply: u64,
}

impl Default for Match {
    fn default() -> Match {
        Match {
            state: BoardState::new(Mode::NorthSouth),
            phase: MatchPhase::Menu,
            mover: None,
            verdict: None,
            ply: 0,
        }
    }
}

impl Match {
    /// Creates a fresh match in its setup phase.
    pub fn new(mode: Mode) -> Match {
        let mut m = Match::default();
        m.new_match(mode);
        m
    }

    /// Resets everything for a new game in the given mode.
    pub fn new_match(&mut self, mode: Mode) {
        self.state = BoardState::new(mode);
        self.phase = MatchPhase::Setup;
        self.mover = None;
        self.verdict = None;
        self.ply = 0;
    }

    /// Resumes combat from an externally built position, e.g. a sandbox
    /// editor or a persisted layout.
    pub fn from_state(state: BoardState, mover: Player) -> Match {
        Match {
            state,
            phase: MatchPhase::Combat,
            mover: Some(mover),
            verdict: None,
            ply: 0,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn mover(&self) -> Option<Player> {
        self.mover
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn ply(&self) -> u64 {
        self.ply
    }

    // ---- setup calls ----

    fn setup_guard(&self, player: Player) -> Result<(), SetupError> {
        if self.phase != MatchPhase::Setup {
            return Err(SetupError::NotInSetup);
        }
        if !self.state.is_active(player) {
            return Err(SetupError::InactivePlayer);
        }
        Ok(())
    }

    /// Places a piece from the player's inventory, or removes one back
    /// into it when `role` is None.
    pub fn try_place_piece(
        &mut self,
        player: Player,
        cell: Cell,
        role: Option<Role>,
    ) -> Result<(), SetupError> {
        self.setup_guard(player)?;
        if !self.state.mode.contains(player, cell) {
            return Err(SetupError::OutsideTerritory);
        }
        match role {
            Some(role) => {
                if self.state.piece_at(cell).is_some() {
                    return Err(SetupError::CellOccupied);
                }
                if !self.state.terrain_at(cell).admits(role) {
                    return Err(SetupError::IncompatibleTerrain);
                }
                if !self.state.inventory_mut(player).take_piece(role) {
                    return Err(SetupError::InventoryExhausted);
                }
                self.state.set_piece(cell, Some(Piece::new(role, player)));
            }
            None => {
                let piece = self
                    .state
                    .piece_at(cell)
                    .filter(|p| p.owner == player)
                    .ok_or(SetupError::NothingToRemove)?;
                self.state.set_piece(cell, None);
                self.state.inventory_mut(player).return_piece(piece.role);
            }
        }
        self.maybe_begin_combat();
        Ok(())
    }

    pub fn place_piece(&mut self, player: Player, cell: Cell, role: Option<Role>) -> bool {
        self.try_place_piece(player, cell, role).is_ok()
    }

    /// Places a terrain unit from the player's inventory, or reclaims the
    /// cell's terrain when `kind` is None.
    pub fn try_place_terrain(
        &mut self,
        player: Player,
        cell: Cell,
        kind: Option<Terrain>,
    ) -> Result<(), SetupError> {
        self.setup_guard(player)?;
        if !self.state.mode.contains(player, cell) {
            return Err(SetupError::OutsideTerritory);
        }
        match kind {
            Some(Terrain::Flat) => return Err(SetupError::FlatNotPlaceable),
            Some(kind) => {
                if self.state.terrain_at(cell) != Terrain::Flat {
                    return Err(SetupError::CellOccupied);
                }
                if let Some(occupant) = self.state.piece_at(cell) {
                    if !kind.admits(occupant.role) {
                        return Err(SetupError::IncompatibleTerrain);
                    }
                }
                if !self.state.inventory_mut(player).take_terrain(kind) {
                    return Err(SetupError::InventoryExhausted);
                }
                self.state.set_terrain(cell, kind);
            }
            None => {
                let current = self.state.terrain_at(cell);
                if current == Terrain::Flat {
                    return Err(SetupError::NothingToRemove);
                }
                self.state.set_terrain(cell, Terrain::Flat);
                self.state.inventory_mut(player).return_terrain(current);
            }
        }
        self.maybe_begin_combat();
        Ok(())
    }

    pub fn place_terrain(&mut self, player: Player, cell: Cell, kind: Option<Terrain>) -> bool {
        self.try_place_terrain(player, cell, kind).is_ok()
    }

    /// Applies the classical fixed formation for the player.
    pub fn apply_classical_formation(&mut self, player: Player) -> bool {
        if self.setup_guard(player).is_err() {
            return false;
        }
        gen::apply_classical(&mut self.state, player);
        self.maybe_begin_combat();
        true
    }

    pub fn randomize_units(&mut self, player: Player, rng: &mut impl Rng) -> bool {
        if self.setup_guard(player).is_err() {
            return false;
        }
        gen::randomize_units(&mut self.state, player, rng);
        self.maybe_begin_combat();
        true
    }

    pub fn randomize_terrain(&mut self, player: Player, rng: &mut impl Rng) -> bool {
        if self.setup_guard(player).is_err() {
            return false;
        }
        gen::randomize_terrain(&mut self.state, player, rng);
        self.maybe_begin_combat();
        true
    }

    /// Mirrors the source player's layout onto their diagonal partner.
    pub fn mirror_board(&mut self, source: Player) -> bool {
        if self.setup_guard(source).is_err() {
            return false;
        }
        gen::mirror_board(&mut self.state, source);
        self.maybe_begin_combat();
        true
    }

    pub fn reset_units(&mut self, player: Player) -> bool {
        if self.setup_guard(player).is_err() {
            return false;
        }
        gen::reset_units(&mut self.state, player);
        true
    }

    pub fn reset_terrain(&mut self, player: Player) -> bool {
        if self.setup_guard(player).is_err() {
            return false;
        }
        gen::reset_terrain(&mut self.state, player);
        true
    }

    /// Overwrites the whole board's terrain with a freshly generated
    /// layout and drains every seated player's terrain pool: the quota is
    /// met by construction.
    pub fn generate_terrain(&mut self, seed: u64, symmetry: Symmetry) -> bool {
        if self.phase != MatchPhase::Setup {
            return false;
        }
        let grid = gen::generate(self.state.mode, seed, symmetry);
        gen::apply_generated(&mut self.state, &grid);
        for &player in self.state.mode.players() {
            self.state.inventory_mut(player).clear_terrain();
        }
        self.maybe_begin_combat();
        true
    }

    /// Setup ends once every active player has emptied their piece
    /// inventory and meets the territory terrain quota.
    fn maybe_begin_combat(&mut self) {
        if self.phase != MatchPhase::Setup {
            return;
        }
        let quota = self.state.mode.terrain_quota();
        let ready = self.state.active.iter().all(|&p| {
            self.state.inventory(p).pieces_empty() && self.state.placed_terrain_count(p) >= quota
        });
        if ready {
            self.phase = MatchPhase::Combat;
            self.mover = self.state.active.first().copied();
        }
    }

    // ---- combat ----

    /// Validates and applies a combat move; the sole combat mutator.
    pub fn try_move_piece(&mut self, from: Cell, to: Cell) -> Result<MoveReceipt, MoveError> {
        if self.phase != MatchPhase::Combat {
            return Err(MoveError::NotInCombat);
        }
        let mover = self.mover.ok_or(MoveError::NotInCombat)?;
        let piece = self.state.piece_at(from).ok_or(MoveError::EmptySource)?;
        if piece.owner != mover {
            return Err(MoveError::NotYourPiece);
        }
        if !moves_of(from, &self.state, 0, false).contains(&to) {
            return Err(MoveError::IllegalDestination);
        }

        let applied = apply_move(&mut self.state, from, to).ok_or(MoveError::EmptySource)?;
        let mut receipt = MoveReceipt {
            from,
            to,
            captured: applied.captured,
            promoted: applied.promoted,
            eliminated: applied.eliminated.into_iter().collect(),
            desert_losses: Vec::new(),
            skipped: Vec::new(),
        };
        self.ply += 1;

        if !self.hostilities_remain() {
            self.finish(Some(mover), Some(VictoryReason::Capture));
            return Ok(receipt);
        }

        let sweep = desert_sweep(&mut self.state, mover, to);
        receipt.desert_losses = sweep.destroyed;
        if sweep.eliminated {
            receipt.eliminated.push(mover);
            if !self.hostilities_remain() {
                let winner = self.state.active.first().copied();
                self.finish(winner, Some(VictoryReason::DesertElimination));
                return Ok(receipt);
            }
        }

        receipt.skipped = self.advance_turn(mover);
        Ok(receipt)
    }

    /// `try_move_piece` with the spec's silent-rejection surface.
    pub fn move_piece(&mut self, from: Cell, to: Cell) -> bool {
        self.try_move_piece(from, to).is_ok()
    }

    /// The player concedes. Their pieces leave the board without
    /// inheritance.
    pub fn forfeit(&mut self, player: Player) -> bool {
        if self.phase != MatchPhase::Combat || !self.state.is_active(player) {
            return false;
        }
        let cells: Vec<Cell> = self.state.pieces_of(player).map(|(c, _)| c).collect();
        for cell in cells {
            self.state.set_piece(cell, None);
        }
        self.state.eliminate(player);
        self.ply += 1;

        if !self.hostilities_remain() {
            let winner = self.state.active.first().copied();
            self.finish(winner, Some(VictoryReason::Forfeit));
        } else if self.mover == Some(player) {
            self.advance_turn(player);
        } else if let Some(mover) = self.mover {
            // The vanished pieces may have been the mover's only targets;
            // a mover left without a legal move is skipped like any other.
            if !has_any_legal_move(mover, &self.state) {
                self.advance_turn(mover);
            }
        }
        true
    }

    /// True while at least two mutually hostile players remain. In team
    /// play a whole surviving team ends the match, not just a last player.
    fn hostilities_remain(&self) -> bool {
        match self.state.active.first() {
            Some(&first) => self
                .state
                .active
                .iter()
                .any(|&p| self.state.mode.hostile(first, p)),
            None => false,
        }
    }

    /// Rotates to the next active player with a legal move, starting
    /// after `after`. Skipped players are returned so callers can surface
    /// the delay. With no movable player anywhere the match ends in an
    /// explicit draw.
    fn advance_turn(&mut self, after: Player) -> Vec<Player> {
        let mut skipped = Vec::new();
        let mut cursor = after;
        for _ in 0..self.state.active.len() {
            cursor = match self.next_active_after(cursor) {
                Some(p) => p,
                None => break,
            };
            if has_any_legal_move(cursor, &self.state) {
                self.mover = Some(cursor);
                return skipped;
            }
            skipped.push(cursor);
        }
        // Nobody can move: terminal, drawn, and explicitly so.
        self.finish(None, None);
        skipped
    }

    /// The next active player after `p` in the mode's canonical seating
    /// order.
    fn next_active_after(&self, p: Player) -> Option<Player> {
        let seats = self.state.mode.players();
        let start = seats.iter().position(|&s| s == p)?;
        (1..=seats.len())
            .map(|i| seats[(start + i) % seats.len()])
            .find(|&s| self.state.is_active(s))
    }

    fn finish(&mut self, winner: Option<Player>, reason: Option<VictoryReason>) {
        self.phase = MatchPhase::Terminal;
        self.mover = None;
        self.verdict = Some(Verdict { winner, reason });
    }

    // ---- background work ----

    /// An immutable copy of the position for background computation.
    pub fn snapshot(&self) -> Option<Snapshot> {
        Some(Snapshot {
            state: self.state.clone(),
            mover: self.mover?,
            ply: self.ply,
        })
    }

    /// True while no move has been applied since the snapshot was taken.
    pub fn is_current(&self, snapshot: &Snapshot) -> bool {
        self.phase == MatchPhase::Combat && self.ply == snapshot.ply
    }

    /// Lets the local AI take the current turn synchronously. Returns
    /// None only outside combat or when no legal move exists (which
    /// advance_turn prevents). Background workers should search over a
    /// `snapshot` and gate the result on `is_current` instead.
    pub fn ai_move(&mut self, depth: u32, rng: &mut impl Rng) -> Option<MoveReceipt> {
        let mover = self.mover?;
        let (from, to) = search::choose_move(mover, &self.state, depth, rng)?;
        self.try_move_piece(from, to).ok()
    }
}
