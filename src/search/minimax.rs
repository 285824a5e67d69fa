//! Paranoid alpha-beta minimax.
//!
//! Every node allied with the root player maximizes the root's evaluation
//! and every enemy node minimizes it, so in team and free-for-all modes
//! the search assumes all opponents gang up on the root. Root moves are
//! ordered captures-first with a small random jitter and searched in
//! parallel, each over its own clone of the position.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use crate::board::{BoardState, Cell, Player};
use crate::eval::{evaluate, role_value, WIN_SCORE};
use crate::game::{apply_move, desert_sweep};
use crate::movegen::{cell_attacked, has_any_legal_move, in_check, legal_move_pairs};

/// Search depth used when the caller has no preference.
pub const DEFAULT_DEPTH: u32 = 2;

/// The principal move found by a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub from: Cell,
    pub to: Cell,
    pub score: f32,
    pub nodes: u64,
}

/// Picks a move for the player. Depth 0 plays uniformly at random over
/// the legal moves; otherwise the best root move of a full-depth search.
/// Returns None only when the player has no legal move.
pub fn choose_move(
    player: Player,
    state: &BoardState,
    depth: u32,
    rng: &mut impl Rng,
) -> Option<(Cell, Cell)> {
    if depth == 0 {
        return legal_move_pairs(player, state).choose(rng).copied();
    }
    search(player, state, depth, rng).map(|result| (result.from, result.to))
}

/// Runs the root search. Ties keep the earlier move in capture-first
/// order, so with a fixed rng seed the result is reproducible.
pub fn search(
    player: Player,
    state: &BoardState,
    depth: u32,
    rng: &mut impl Rng,
) -> Option<SearchResult> {
    let pairs = legal_move_pairs(player, state);
    if pairs.is_empty() {
        return None;
    }

    let mut ordered: Vec<(f32, Cell, Cell)> = pairs
        .into_iter()
        .map(|(from, to)| (order_score(player, state, from, to, rng), from, to))
        .collect();
    ordered.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let scored: Vec<(f32, Cell, Cell, u64)> = ordered
        .par_iter()
        .map(|&(_, from, to)| {
            let mut child = state.clone();
            let _ = apply_move(&mut child, from, to);
            let mut nodes = 1u64;
            let score = child_score(
                player,
                &mut child,
                player,
                to,
                depth.saturating_sub(1),
                f32::NEG_INFINITY,
                f32::INFINITY,
                &mut nodes,
            );
            (score, from, to, nodes)
        })
        .collect();

    let mut best = scored.first().copied()?;
    let mut nodes = 0;
    for entry in &scored {
        nodes += entry.3;
        if entry.0 > best.0 {
            best = *entry;
        }
    }
    Some(SearchResult {
        from: best.1,
        to: best.2,
        score: best.0,
        nodes,
    })
}

/// Captures first, weighted by the value gained minus half the mover's
/// value when the destination is defended, with jitter as a tie-break.
fn order_score(
    player: Player,
    state: &BoardState,
    from: Cell,
    to: Cell,
    rng: &mut impl Rng,
) -> f32 {
    let mut score = rng.gen::<f32>();
    if let Some(victim) = state.piece_at(to) {
        score += role_value(victim.role);
    }
    if let Some(piece) = state.piece_at(from) {
        if cell_attacked(to, player, state, 1) {
            score -= role_value(piece.role) / 2.0;
        }
    }
    score
}

/// Win/loss detection from the root player's perspective. The depth term
/// makes the search prefer faster wins and slower losses.
fn terminal_score(state: &BoardState, root: Player, depth: u32) -> Option<f32> {
    if state.leader_cell(root).is_none() {
        return Some(-(WIN_SCORE + depth as f32));
    }
    if state.active.iter().all(|&p| state.mode.allied(p, root)) {
        return Some(WIN_SCORE + depth as f32);
    }
    None
}

/// The next active player after `after` with at least one legal move,
/// mirroring the controller's turn rotation. None means nobody can move.
fn next_movable_after(state: &BoardState, after: Player) -> Option<Player> {
    let seats = state.mode.players();
    let start = seats.iter().position(|&s| s == after)?;
    (1..=seats.len())
        .map(|i| seats[(start + i) % seats.len()])
        .filter(|&s| state.is_active(s))
        .find(|&s| has_any_legal_move(s, state))
}

/// Scores an already-applied move. Terminal detection runs in the same
/// order the controller uses: a capture win ends the game before the
/// desert rule, then the sweep itself may settle things, and only a live
/// position recurses.
#[allow(clippy::too_many_arguments)]
fn child_score(
    root: Player,
    child: &mut BoardState,
    mover: Player,
    to: Cell,
    depth: u32,
    alpha: f32,
    beta: f32,
    nodes: &mut u64,
) -> f32 {
    if let Some(outcome) = terminal_score(child, root, depth) {
        return outcome;
    }
    desert_sweep(child, mover, to);
    if let Some(outcome) = terminal_score(child, root, depth) {
        return outcome;
    }
    match next_movable_after(child, mover) {
        Some(next) => search_node(root, child, next, depth, alpha, beta, nodes),
        None => 0.0,
    }
}

fn search_node(
    root: Player,
    state: &BoardState,
    mover: Player,
    depth: u32,
    mut alpha: f32,
    mut beta: f32,
    nodes: &mut u64,
) -> f32 {
    *nodes += 1;
    if depth == 0 {
        return evaluate(root, state);
    }

    let pairs = legal_move_pairs(mover, state);
    if pairs.is_empty() {
        // Checkmated movers score as a depth-adjusted mate for whichever
        // side they are not on; a bare stalemate scores level.
        if in_check(mover, state) {
            return if state.mode.allied(mover, root) {
                -(WIN_SCORE + depth as f32)
            } else {
                WIN_SCORE + depth as f32
            };
        }
        return 0.0;
    }

    let maximizing = state.mode.allied(mover, root);
    let mut best = if maximizing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    };
    for (from, to) in pairs {
        let mut child = state.clone();
        let _ = apply_move(&mut child, from, to);
        let score = child_score(root, &mut child, mover, to, depth - 1, alpha, beta, nodes);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}
