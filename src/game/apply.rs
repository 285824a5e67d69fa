//! Pure move application.
//!
//! Applies a single move to a board state: capture, army inheritance on a
//! Leader capture, Infantry promotion, and the post-move desert sweep.
//! No legality checking happens here; the controller validates against
//! the move generator first, and the search uses these directly on cloned
//! snapshots.

use crate::board::{BoardState, Cell, Piece, Player, Role, Terrain};

/// What a single applied move did to the board.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedMove {
    /// The moved piece as it now stands (post-promotion).
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted: bool,
    /// Player eliminated by a Leader capture, if any.
    pub eliminated: Option<Player>,
}

/// Moves the piece at `from` to `to`, handling capture, inheritance, and
/// promotion. Returns None if `from` is empty.
pub fn apply_move(state: &mut BoardState, from: Cell, to: Cell) -> Option<AppliedMove> {
    let mut piece = state.piece_at(from)?;
    let captured = state.piece_at(to);
    state.set_piece(from, None);
    state.set_piece(to, Some(piece));

    // Capturing a Leader hands the defeated player's remaining army to
    // the capturer instead of removing it.
    let mut eliminated = None;
    if let Some(victim) = captured {
        if victim.role == Role::Leader {
            let loser = victim.owner;
            for cell in Cell::all() {
                if let Some(p) = state.piece_at(cell) {
                    if p.owner == loser {
                        state.set_piece(cell, Some(Piece::new(p.role, piece.owner)));
                    }
                }
            }
            state.eliminate(loser);
            eliminated = Some(loser);
        }
    }

    let mut promoted = false;
    if piece.role == Role::Infantry && state.mode.is_promotion_cell(piece.owner, to) {
        piece.role = Role::Elite;
        state.set_piece(to, Some(piece));
        promoted = true;
    }

    Some(AppliedMove {
        piece,
        captured,
        promoted,
        eliminated,
    })
}

/// Result of the desert rule after a move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesertSweep {
    /// Pieces destroyed by the desert, with the cells they stood on.
    pub destroyed: Vec<(Cell, Piece)>,
    /// True if the mover's Leader was among them, which destroys the
    /// whole army and eliminates the player.
    pub eliminated: bool,
}

/// Destroys every piece of `mover` standing on Desert except the piece
/// that just moved this turn. A Leader lost this way takes the entire
/// remaining army with it.
pub fn desert_sweep(state: &mut BoardState, mover: Player, just_moved: Cell) -> DesertSweep {
    let mut sweep = DesertSweep::default();
    let mut leader_lost = false;

    let stranded: Vec<(Cell, Piece)> = state
        .pieces_of(mover)
        .filter(|&(cell, _)| cell != just_moved && state.terrain_at(cell) == Terrain::Desert)
        .collect();
    for (cell, piece) in stranded {
        state.set_piece(cell, None);
        if piece.role == Role::Leader {
            leader_lost = true;
        }
        sweep.destroyed.push((cell, piece));
    }

    if leader_lost {
        let remnants: Vec<(Cell, Piece)> = state.pieces_of(mover).collect();
        for (cell, piece) in remnants {
            state.set_piece(cell, None);
            sweep.destroyed.push((cell, piece));
        }
        state.eliminate(mover);
        sweep.eliminated = true;
    }

    sweep
}
