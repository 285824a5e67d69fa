//! Heuristic position evaluation.
//!
//! Scores a position from one player's perspective using handcrafted
//! features: role-weighted material for the own side minus all enemies, a
//! center-proximity bonus, a fixed in-check penalty, and an endgame
//! king-hunt term that switches on as the enemy's material melts away.

use crate::board::{BoardState, Player, Role};
use crate::movegen::in_check;

/// Score returned when the position is already won or lost outright.
pub const WIN_SCORE: f32 = 100_000.0;

/// Enemy non-Leader material below which the king hunt reaches full
/// strength.
const HUNT_THRESHOLD: f32 = 1800.0;

const CHECK_PENALTY: f32 = 75.0;

/// Role-weighted material values, Leader dominating everything.
pub const fn role_value(role: Role) -> f32 {
    match role {
        Role::Leader => 10_000.0,
        Role::Elite => 900.0,
        Role::HeavyArmor => 500.0,
        Role::Ranged => 330.0,
        Role::Cavalry => 300.0,
        Role::Infantry => 100.0,
    }
}

/// Sums the non-Leader material of a player.
fn fighting_material(state: &BoardState, player: Player) -> f32 {
    state
        .pieces_of(player)
        .filter(|(_, p)| p.role != Role::Leader)
        .map(|(_, p)| role_value(p.role))
        .sum()
}

/// Evaluates a board position for the given player.
///
/// Missing Leaders short-circuit: no own Leader is an immediate loss, no
/// enemy Leader anywhere an immediate win.
pub fn evaluate(player: Player, state: &BoardState) -> f32 {
    if state.leader_cell(player).is_none() {
        return -WIN_SCORE;
    }

    let mode = state.mode;
    let enemies: Vec<Player> = state
        .active
        .iter()
        .copied()
        .filter(|&p| mode.hostile(p, player))
        .collect();
    if enemies.iter().all(|&e| state.leader_cell(e).is_none()) {
        return WIN_SCORE;
    }

    let mut score = 0.0f32;

    // Own side: material plus centralization.
    for &friend in state.active.iter().filter(|&&p| mode.allied(p, player)) {
        for (cell, piece) in state.pieces_of(friend) {
            score += role_value(piece.role);
            score += (5.5 - cell.center_distance()) * 2.0;
        }
    }

    // Enemy side: material only.
    for &enemy in &enemies {
        for (_, piece) in state.pieces_of(enemy) {
            score -= role_value(piece.role);
        }
    }

    if in_check(player, state) {
        score -= CHECK_PENALTY;
    }

    // Endgame king hunt: once an enemy's fighting material drops below
    // the threshold, reward driving their Leader to the rim and closing
    // in with our own pieces.
    for &enemy in &enemies {
        let enemy_leader = match state.leader_cell(enemy) {
            Some(c) => c,
            None => continue,
        };
        let material = fighting_material(state, enemy);
        let factor = ((HUNT_THRESHOLD - material) / HUNT_THRESHOLD).clamp(0.0, 1.0);
        if factor == 0.0 {
            continue;
        }
        score += factor * enemy_leader.center_distance() * 12.0;
        let closing: f32 = state
            .pieces_of(player)
            .map(|(cell, _)| cell.chebyshev(enemy_leader) as f32)
            .sum();
        score -= factor * closing;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Mode, Piece};
    use crate::gen::apply_classical;

    fn place(state: &mut BoardState, cell: Cell, role: Role, owner: Player) {
        state.set_piece(cell, Some(Piece::new(role, owner)));
    }

    #[test]
    fn missing_own_leader_is_a_loss() {
        let mut state = BoardState::new(Mode::NorthSouth);
        place(&mut state, Cell::new(9, 9), Role::Leader, Player::Blue);
        assert_eq!(evaluate(Player::Red, &state), -WIN_SCORE);
    }

    #[test]
    fn missing_enemy_leader_is_a_win() {
        let mut state = BoardState::new(Mode::NorthSouth);
        place(&mut state, Cell::new(2, 2), Role::Leader, Player::Red);
        assert_eq!(evaluate(Player::Red, &state), WIN_SCORE);
    }

    #[test]
    fn classical_start_is_roughly_symmetric() {
        let mut state = BoardState::new(Mode::NorthSouth);
        apply_classical(&mut state, Player::Red);
        apply_classical(&mut state, Player::Blue);
        let red = evaluate(Player::Red, &state);
        let blue = evaluate(Player::Blue, &state);
        assert!(
            (red - blue).abs() < 50.0,
            "start spread too large: red={}, blue={}",
            red,
            blue
        );
    }

    #[test]
    fn material_advantage_scores_higher() {
        let mut even = BoardState::new(Mode::NorthSouth);
        place(&mut even, Cell::new(2, 2), Role::Leader, Player::Red);
        place(&mut even, Cell::new(9, 9), Role::Leader, Player::Blue);
        place(&mut even, Cell::new(3, 3), Role::HeavyArmor, Player::Red);
        place(&mut even, Cell::new(8, 8), Role::HeavyArmor, Player::Blue);

        let mut up = even.clone();
        up.set_piece(Cell::new(8, 8), None);

        assert!(evaluate(Player::Red, &up) > evaluate(Player::Red, &even));
    }

    #[test]
    fn centralized_pieces_score_higher() {
        let mut rim = BoardState::new(Mode::NorthSouth);
        place(&mut rim, Cell::new(0, 0), Role::Leader, Player::Red);
        place(&mut rim, Cell::new(0, 11), Role::Elite, Player::Red);
        place(&mut rim, Cell::new(11, 0), Role::Leader, Player::Blue);

        let mut central = BoardState::new(Mode::NorthSouth);
        place(&mut central, Cell::new(0, 0), Role::Leader, Player::Red);
        place(&mut central, Cell::new(5, 5), Role::Elite, Player::Red);
        place(&mut central, Cell::new(11, 0), Role::Leader, Player::Blue);

        assert!(evaluate(Player::Red, &central) > evaluate(Player::Red, &rim));
    }

    #[test]
    fn being_in_check_is_penalized() {
        let mut safe = BoardState::new(Mode::NorthSouth);
        place(&mut safe, Cell::new(2, 2), Role::Leader, Player::Red);
        place(&mut safe, Cell::new(9, 9), Role::Leader, Player::Blue);
        place(&mut safe, Cell::new(9, 5), Role::HeavyArmor, Player::Blue);

        let mut checked = safe.clone();
        // Slide the rook onto Red's file.
        checked.set_piece(Cell::new(9, 5), None);
        place(&mut checked, Cell::new(9, 2), Role::HeavyArmor, Player::Blue);

        assert!(evaluate(Player::Red, &safe) > evaluate(Player::Red, &checked));
    }

    #[test]
    fn king_hunt_rewards_cornering_a_bare_leader() {
        let mut cornered = BoardState::new(Mode::NorthSouth);
        place(&mut cornered, Cell::new(5, 5), Role::Leader, Player::Red);
        place(&mut cornered, Cell::new(6, 6), Role::Elite, Player::Red);
        place(&mut cornered, Cell::new(11, 11), Role::Leader, Player::Blue);

        let mut central = BoardState::new(Mode::NorthSouth);
        place(&mut central, Cell::new(5, 5), Role::Leader, Player::Red);
        place(&mut central, Cell::new(6, 6), Role::Elite, Player::Red);
        place(&mut central, Cell::new(6, 5), Role::Leader, Player::Blue);

        assert!(evaluate(Player::Red, &cornered) > evaluate(Player::Red, &central));
    }

    #[test]
    fn hunt_factor_inactive_with_full_material() {
        let mut state = BoardState::new(Mode::NorthSouth);
        apply_classical(&mut state, Player::Red);
        apply_classical(&mut state, Player::Blue);
        // Full roster fighting material is far above the threshold, so the
        // evaluation must be pure material + position with no hunt term.
        assert!(fighting_material(&state, Player::Blue) > HUNT_THRESHOLD);
    }

    #[test]
    fn teammate_material_counts_in_two_vs_two() {
        let mut solo = BoardState::new(Mode::TwoVsTwo);
        place(&mut solo, Cell::new(2, 2), Role::Leader, Player::Red);
        place(&mut solo, Cell::new(9, 2), Role::Leader, Player::Blue);

        let mut with_partner = solo.clone();
        place(&mut with_partner, Cell::new(9, 9), Role::Elite, Player::Yellow);

        assert!(evaluate(Player::Red, &with_partner) > evaluate(Player::Red, &solo));
    }

    #[test]
    fn evaluate_is_deterministic() {
        let mut state = BoardState::new(Mode::FourPlayer);
        for &p in Mode::FourPlayer.players() {
            apply_classical(&mut state, p);
        }
        assert_eq!(evaluate(Player::Green, &state), evaluate(Player::Green, &state));
    }
}
