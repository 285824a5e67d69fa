//! Check oracle and the legal-move read surface.

use crate::board::{BoardState, Cell, Player};

use super::moves::{cell_attacked, moves_of};

/// Returns true if the player's Leader is attacked by any hostile piece.
///
/// A player with no Leader on the board is treated as in check (lost).
/// Enemy move sets are generated at depth 1, which bypasses the top-level
/// self-check filter and so cannot recurse back here.
pub fn in_check(player: Player, state: &BoardState) -> bool {
    let leader = match state.leader_cell(player) {
        Some(c) => c,
        None => return true,
    };
    cell_attacked(leader, player, state, 1)
}

/// Returns true if the player has at least one fully legal move.
pub fn has_any_legal_move(player: Player, state: &BoardState) -> bool {
    state
        .pieces_of(player)
        .any(|(cell, _)| !moves_of(cell, state, 0, false).is_empty())
}

/// The complete set of legal `(from, to)` pairs for the player, in plain
/// coordinates. This is the contract surface for external search engines:
/// a backend with no terrain knowledge can be constrained to exactly these
/// moves.
pub fn legal_move_pairs(player: Player, state: &BoardState) -> Vec<(Cell, Cell)> {
    let mut pairs = Vec::new();
    for (cell, _) in state.pieces_of(player) {
        for dest in moves_of(cell, state, 0, false) {
            pairs.push((cell, dest));
        }
    }
    pairs
}
