//! Per-role pseudo-legal move generation.
//!
//! `moves_of` enumerates destination cells for the piece on a given cell,
//! applying the terrain traversal rules and, at the top level, the
//! self-check legality filter. Attack probes re-enter this function at
//! `depth + 1` with the filter skipped, so the recursion is bounded: the
//! Leader's guarded two-step never probes more than one extra level.

use crate::board::{
    BoardState, Cell, Piece, Player, Role, Terrain, DIAGONAL, KNIGHT, ORTHOGONAL,
};

use super::check::in_check;

/// Generates the destination cells for the piece at `from`.
///
/// Returns an empty vec if the cell is empty. At `depth == 0` (unless
/// `skip_check_filter` is set) every destination is simulated and dropped
/// if it would leave the mover's own Leader attacked.
pub fn moves_of(from: Cell, state: &BoardState, depth: u8, skip_check_filter: bool) -> Vec<Cell> {
    let piece = match state.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut dests = Vec::new();
    match piece.role {
        Role::Infantry => infantry_moves(from, piece, state, &mut dests),
        Role::Cavalry => knight_moves(from, piece, state, &mut dests),
        Role::Ranged => slide(from, piece, state, &DIAGONAL, &mut dests),
        Role::HeavyArmor => slide(from, piece, state, &ORTHOGONAL, &mut dests),
        Role::Elite => {
            knight_moves(from, piece, state, &mut dests);
            slide(from, piece, state, &DIAGONAL, &mut dests);
            slide(from, piece, state, &ORTHOGONAL, &mut dests);
        }
        Role::Leader => leader_moves(from, piece, state, depth, &mut dests),
    }

    if depth == 0 && !skip_check_filter {
        dests.retain(|&to| !leaves_own_leader_exposed(from, to, piece.owner, state));
    }
    dests
}

/// Returns true if any piece hostile to `defender` attacks `target`.
///
/// Attack sets are the move sets generated at the given probe depth with
/// the self-check filter skipped; a pinned piece still gives check.
pub fn cell_attacked(target: Cell, defender: Player, state: &BoardState, depth: u8) -> bool {
    for cell in Cell::all() {
        let piece = match state.piece_at(cell) {
            Some(p) => p,
            None => continue,
        };
        if !state.mode.hostile(piece.owner, defender) {
            continue;
        }
        if moves_of(cell, state, depth, true).contains(&target) {
            return true;
        }
    }
    false
}

/// Simulates the move with full capture semantics on a scratch board and
/// reports whether the mover's Leader would then be attacked. Army
/// inheritance is part of the simulation: capturing a Leader converts the
/// defeated player's pieces, so a pin by that player dissolves instead of
/// reading as a leftover check.
fn leaves_own_leader_exposed(from: Cell, to: Cell, owner: Player, state: &BoardState) -> bool {
    let mut scratch = state.clone();
    let _ = crate::game::apply_move(&mut scratch, from, to);
    in_check(owner, &scratch)
}

/// A destination is open if it is empty or holds a capturable enemy.
fn open_for(piece: Piece, dest: Cell, state: &BoardState) -> bool {
    match state.piece_at(dest) {
        None => true,
        Some(other) => state.mode.hostile(piece.owner, other.owner),
    }
}

/// Slides along each direction until blocked. A cell whose terrain bars
/// the role ends the ray before entry; an occupied cell ends it at entry
/// (capture if hostile); Desert is enterable but never traversable.
fn slide(from: Cell, piece: Piece, state: &BoardState, dirs: &[(i8, i8)], out: &mut Vec<Cell>) {
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            let terrain = state.terrain_at(next);
            if terrain.bars_entry(piece.role) {
                break;
            }
            match state.piece_at(next) {
                Some(other) => {
                    if state.mode.hostile(piece.owner, other.owner) {
                        out.push(next);
                    }
                    break;
                }
                None => {
                    out.push(next);
                    if terrain == Terrain::Desert {
                        break;
                    }
                }
            }
            cur = next;
        }
    }
}

fn knight_moves(from: Cell, piece: Piece, state: &BoardState, out: &mut Vec<Cell>) {
    for &(dr, dc) in &KNIGHT {
        let dest = match from.offset(dr, dc) {
            Some(c) => c,
            None => continue,
        };
        if state.terrain_at(dest).bars_entry(piece.role) {
            continue;
        }
        if open_for(piece, dest, state) {
            out.push(dest);
        }
    }
}

fn infantry_moves(from: Cell, piece: Piece, state: &BoardState, out: &mut Vec<Cell>) {
    let (fr, fc) = state.mode.forward(piece.owner);

    // One-step advance to an empty cell.
    if let Some(dest) = from.offset(fr, fc) {
        if state.piece_at(dest).is_none() {
            out.push(dest);
        }
    }

    // Diagonal captures flanking the forward direction. For a diagonal
    // forward the flanks are its two orthogonal components.
    let captures: [(i8, i8); 2] = if fr != 0 && fc != 0 {
        [(fr, 0), (0, fc)]
    } else if fr != 0 {
        [(fr, -1), (fr, 1)]
    } else {
        [(-1, fc), (1, fc)]
    };
    for (dr, dc) in captures {
        if let Some(dest) = from.offset(dr, dc) {
            if let Some(other) = state.piece_at(dest) {
                if state.mode.hostile(piece.owner, other.owner) {
                    out.push(dest);
                }
            }
        }
    }

    // Backward vault: two cells opposite forward, destination-only check.
    if let Some(dest) = from.offset(-2 * fr, -2 * fc) {
        if state.piece_at(dest).is_none() {
            out.push(dest);
        }
    }

    // Backward-diagonal vault captures, also destination-only.
    let vaults: [(i8, i8); 2] = if fr != 0 && fc != 0 {
        [(-2 * fr, 0), (0, -2 * fc)]
    } else if fr != 0 {
        [(-2 * fr, -2), (-2 * fr, 2)]
    } else {
        [(-2, -2 * fc), (2, -2 * fc)]
    };
    for (dr, dc) in vaults {
        if let Some(dest) = from.offset(dr, dc) {
            if let Some(other) = state.piece_at(dest) {
                if state.mode.hostile(piece.owner, other.owner) {
                    out.push(dest);
                }
            }
        }
    }
}

fn leader_moves(from: Cell, piece: Piece, state: &BoardState, depth: u8, out: &mut Vec<Cell>) {
    for dest in from.neighbors() {
        if open_for(piece, dest, state) {
            out.push(dest);
        }
    }

    // Two-step orthogonal slide through an empty, non-Desert intermediate
    // cell. Probe calls (depth > 0) take the fast path; at the top level
    // the intermediate cell must not be attacked, checked by probing every
    // enemy at depth + 1.
    for &(dr, dc) in &ORTHOGONAL {
        let mid = match from.offset(dr, dc) {
            Some(c) => c,
            None => continue,
        };
        if state.piece_at(mid).is_some() || state.terrain_at(mid) == Terrain::Desert {
            continue;
        }
        let dest = match mid.offset(dr, dc) {
            Some(c) => c,
            None => continue,
        };
        if !open_for(piece, dest, state) {
            continue;
        }
        if depth > 0 || !cell_attacked(mid, piece.owner, state, depth + 1) {
            out.push(dest);
        }
    }
}
