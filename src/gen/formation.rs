//! Classical formations, randomized placement, mirroring, and resets.
//!
//! These operate directly on a `BoardState` during setup; the match
//! controller gates them behind the setup phase. All randomness comes in
//! through `&mut impl Rng` so callers can seed it.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{BoardState, Cell, Piece, Player, Role, Terrain, ALL_ROLES, BOARD_SIZE, PLACEABLE_TERRAIN};

/// Back-rank ordering for the half-board modes, mirrored around the
/// Leader/Elite center pair.
const BACK_RANK: [Role; 8] = [
    Role::HeavyArmor,
    Role::Cavalry,
    Role::Ranged,
    Role::Elite,
    Role::Leader,
    Role::Ranged,
    Role::Cavalry,
    Role::HeavyArmor,
];

/// Compact 4x4 block for quadrant modes, in local coordinates with (0,0)
/// at the player's home corner.
const QUAD_BLOCK: [[Role; 4]; 4] = [
    [Role::Leader, Role::Elite, Role::Ranged, Role::HeavyArmor],
    [Role::Cavalry, Role::Ranged, Role::Cavalry, Role::HeavyArmor],
    [Role::Infantry, Role::Infantry, Role::Infantry, Role::Infantry],
    [Role::Infantry, Role::Infantry, Role::Infantry, Role::Infantry],
];

/// The classical template for a player: (cell, role) pairs covering the
/// full roster.
fn classical_template(state: &BoardState, player: Player) -> Vec<(Cell, Role)> {
    use crate::board::Mode;
    let last = BOARD_SIZE - 1;
    let mut cells = Vec::with_capacity(16);
    match state.mode {
        Mode::NorthSouth => {
            let (back, front) = if player == Player::Red { (0, 1) } else { (last, last - 1) };
            for (i, &role) in BACK_RANK.iter().enumerate() {
                cells.push((Cell::new(back, 2 + i as i8), role));
                cells.push((Cell::new(front, 2 + i as i8), Role::Infantry));
            }
        }
        Mode::EastWest => {
            let (back, front) = if player == Player::Red { (0, 1) } else { (last, last - 1) };
            for (i, &role) in BACK_RANK.iter().enumerate() {
                cells.push((Cell::new(2 + i as i8, back), role));
                cells.push((Cell::new(2 + i as i8, front), Role::Infantry));
            }
        }
        Mode::FourPlayer | Mode::TwoVsTwo => {
            for (lr, row) in QUAD_BLOCK.iter().enumerate() {
                for (lc, &role) in row.iter().enumerate() {
                    let (r, c) = match player {
                        Player::Red => (lr as i8, lc as i8),
                        Player::Blue => (lr as i8, last - lc as i8),
                        Player::Green => (last - lr as i8, lc as i8),
                        Player::Yellow => (last - lr as i8, last - lc as i8),
                    };
                    cells.push((Cell::new(r, c), role));
                }
            }
        }
    }
    cells
}

/// Reclaims every piece of the player back into their inventory.
pub fn reset_units(state: &mut BoardState, player: Player) {
    for cell in Cell::all() {
        if let Some(piece) = state.piece_at(cell) {
            if piece.owner == player {
                state.set_piece(cell, None);
            }
        }
    }
    state.recount_pieces(player);
}

/// Flattens the player's territory and restores the balanced terrain pool.
pub fn reset_terrain(state: &mut BoardState, player: Player) {
    let cells: Vec<Cell> = state.mode.territory(player).collect();
    for cell in cells {
        state.set_terrain(cell, Terrain::Flat);
    }
    let mode = state.mode;
    state.inventory_mut(player).refill_terrain(mode);
}

/// Places the classical fixed formation for the player, reclaiming any
/// previously placed pieces first. Terrain incompatible with a template
/// cell is evicted back into the player's terrain inventory.
pub fn apply_classical(state: &mut BoardState, player: Player) {
    reset_units(state, player);
    for (cell, role) in classical_template(state, player) {
        let terrain = state.terrain_at(cell);
        if !terrain.admits(role) {
            state.inventory_mut(player).return_terrain(terrain);
            state.set_terrain(cell, Terrain::Flat);
        }
        if state.inventory_mut(player).take_piece(role) {
            state.set_piece(cell, Some(Piece::new(role, player)));
        }
    }
}

/// Reclaims the player's placed pieces and inventory into a pool,
/// shuffles it, and greedily places each piece on its best-scoring
/// eligible cell. Unplaceable pieces return to the inventory.
pub fn randomize_units(state: &mut BoardState, player: Player, rng: &mut impl Rng) {
    let mut pool: Vec<Role> = Vec::new();
    for cell in Cell::all() {
        if let Some(piece) = state.piece_at(cell) {
            if piece.owner == player {
                pool.push(piece.role);
                state.set_piece(cell, None);
            }
        }
    }
    for role in ALL_ROLES {
        while state.inventory_mut(player).take_piece(role) {
            pool.push(role);
        }
    }
    if pool.is_empty() {
        for role in ALL_ROLES {
            for _ in 0..role.roster_count() {
                pool.push(role);
            }
        }
    }

    pool.shuffle(rng);

    let territory: Vec<Cell> = state.mode.territory(player).collect();
    for role in pool {
        let mut best: Option<(Cell, f32)> = None;
        for &cell in &territory {
            if state.piece_at(cell).is_some() || !state.terrain_at(cell).admits(role) {
                continue;
            }
            let score = score_unit_cell(state, player, role, cell, rng);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((cell, score));
            }
        }
        match best {
            Some((cell, _)) => state.set_piece(cell, Some(Piece::new(role, player))),
            None => state.inventory_mut(player).return_piece(role),
        }
    }
}

/// Scores a candidate cell for a unit: sanctuary synergy, adjacency to
/// allies already in sanctuary, positional preferences, jitter tie-break.
fn score_unit_cell(
    state: &BoardState,
    player: Player,
    role: Role,
    cell: Cell,
    rng: &mut impl Rng,
) -> f32 {
    let mut score = rng.gen::<f32>() * 10.0;

    let terrain = state.terrain_at(cell);
    if terrain != Terrain::Flat {
        // Eligibility already guaranteed admits(); non-flat means sanctuary.
        score += 100.0;
    }

    for neighbor in cell.neighbors() {
        if let Some(ally) = state.piece_at(neighbor) {
            if state.mode.allied(ally.owner, player) {
                let nt = state.terrain_at(neighbor);
                if nt != Terrain::Flat && nt.admits(ally.role) {
                    score += 30.0;
                }
            }
        }
    }

    let advancement = state.mode.advancement(player, cell) as f32;
    match role {
        Role::Infantry => score += advancement * 4.0,
        Role::Leader | Role::HeavyArmor => score += (11.0 - advancement) * 4.0,
        _ => {}
    }

    let mid = (BOARD_SIZE - 1) as f32 / 2.0;
    score += (mid - (cell.col as f32 - mid).abs()) * 2.0;

    score
}

/// Reclaims the player's placed terrain and inventory into a pool (a
/// fresh balanced pool if both are empty), shuffles it, and greedily
/// assigns each kind to its best-scoring flat cell, respecting the quota.
pub fn randomize_terrain(state: &mut BoardState, player: Player, rng: &mut impl Rng) {
    let territory: Vec<Cell> = state.mode.territory(player).collect();

    let mut pool: Vec<Terrain> = Vec::new();
    for &cell in &territory {
        let kind = state.terrain_at(cell);
        if kind != Terrain::Flat {
            pool.push(kind);
            state.set_terrain(cell, Terrain::Flat);
        }
    }
    for kind in PLACEABLE_TERRAIN {
        while state.inventory_mut(player).take_terrain(kind) {
            pool.push(kind);
        }
    }
    if pool.is_empty() {
        let per_kind = state.mode.terrain_quota() / PLACEABLE_TERRAIN.len();
        for kind in PLACEABLE_TERRAIN {
            for _ in 0..per_kind {
                pool.push(kind);
            }
        }
    }

    pool.shuffle(rng);

    let quota = state.mode.terrain_quota();
    for kind in pool {
        if state.placed_terrain_count(player) >= quota {
            state.inventory_mut(player).return_terrain(kind);
            continue;
        }
        let mut best: Option<(Cell, f32)> = None;
        for &cell in &territory {
            if state.terrain_at(cell) != Terrain::Flat {
                continue;
            }
            if let Some(occupant) = state.piece_at(cell) {
                if !kind.admits(occupant.role) {
                    continue;
                }
            }
            let score = score_terrain_cell(state, player, kind, cell, rng);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((cell, score));
            }
        }
        match best {
            Some((cell, _)) => state.set_terrain(cell, kind),
            None => state.inventory_mut(player).return_terrain(kind),
        }
    }
}

/// Scores a candidate cell for a terrain unit: synergy with the occupant,
/// adjacency to compatible allies, jitter tie-break.
fn score_terrain_cell(
    state: &BoardState,
    player: Player,
    kind: Terrain,
    cell: Cell,
    rng: &mut impl Rng,
) -> f32 {
    let mut score = rng.gen::<f32>() * 10.0;

    if state.piece_at(cell).is_some() {
        // Eligibility guarantees the occupant is compatible: sanctuary.
        score += 50.0;
    }

    for neighbor in cell.neighbors() {
        if let Some(ally) = state.piece_at(neighbor) {
            if state.mode.allied(ally.owner, player) && kind.admits(ally.role) {
                score += 30.0;
            }
        }
    }

    score
}

/// Reflects the source player's entire layout (pieces and terrain)
/// through the board center onto the mirror partner's territory, then
/// recomputes both players' inventories against the canonical roster.
pub fn mirror_board(state: &mut BoardState, source: Player) {
    let partner = state.mode.mirror_partner(source);
    let source_cells: Vec<Cell> = state.mode.territory(source).collect();

    for cell in source_cells {
        let target = cell.reflected();
        state.set_terrain(target, state.terrain_at(cell));
        match state.piece_at(cell) {
            Some(piece) if piece.owner == source => {
                state.set_piece(target, Some(Piece::new(piece.role, partner)));
            }
            _ => state.set_piece(target, None),
        }
    }

    state.recount_pieces(source);
    state.recount_pieces(partner);
    // The partner's remaining terrain pool now matches the source's.
    let source_terrain = state.inventory(source).clone();
    state.inventory_mut(partner).clear_terrain();
    for kind in PLACEABLE_TERRAIN {
        for _ in 0..source_terrain.terrain_count(kind) {
            state.inventory_mut(partner).return_terrain(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn conservation_holds(state: &BoardState, player: Player) -> bool {
        ALL_ROLES.iter().all(|&role| {
            state.placed_count(player, role) + state.inventory(player).piece_count(role)
                == role.roster_count()
        })
    }

    #[test]
    fn classical_places_full_roster_in_territory() {
        for mode in [Mode::NorthSouth, Mode::EastWest, Mode::FourPlayer] {
            let mut state = BoardState::new(mode);
            for &player in mode.players() {
                apply_classical(&mut state, player);
                assert!(state.inventory(player).pieces_empty());
                assert!(conservation_holds(&state, player));
                for (cell, piece) in state.pieces_of(player) {
                    assert!(mode.contains(player, cell), "{:?} outside territory", cell);
                    let _ = piece;
                }
                assert!(state.leader_cell(player).is_some());
            }
        }
    }

    #[test]
    fn classical_is_idempotent() {
        let mut state = BoardState::new(Mode::NorthSouth);
        apply_classical(&mut state, Player::Red);
        let snapshot = state.clone();
        apply_classical(&mut state, Player::Red);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn classical_evicts_incompatible_terrain() {
        let mut state = BoardState::new(Mode::NorthSouth);
        // Desert under the would-be Leader cell (0,6) rejects it.
        state.set_terrain(Cell::new(0, 6), Terrain::Desert);
        let before = state.inventory(Player::Red).terrain_count(Terrain::Desert);
        apply_classical(&mut state, Player::Red);
        assert_eq!(state.terrain_at(Cell::new(0, 6)), Terrain::Flat);
        assert_eq!(
            state.inventory(Player::Red).terrain_count(Terrain::Desert),
            before + 1
        );
    }

    #[test]
    fn classical_keeps_compatible_terrain() {
        let mut state = BoardState::new(Mode::NorthSouth);
        // Forest admits Ranged at (0,4).
        state.set_terrain(Cell::new(0, 4), Terrain::Forest);
        apply_classical(&mut state, Player::Red);
        assert_eq!(state.terrain_at(Cell::new(0, 4)), Terrain::Forest);
    }

    #[test]
    fn randomize_units_places_everything_on_open_board() {
        let mut state = BoardState::new(Mode::NorthSouth);
        let mut rng = seeded();
        randomize_units(&mut state, Player::Red, &mut rng);
        assert_eq!(state.pieces_of(Player::Red).count(), 16);
        assert!(conservation_holds(&state, Player::Red));
        for (cell, _) in state.pieces_of(Player::Red) {
            assert!(Mode::NorthSouth.contains(Player::Red, cell));
        }
    }

    #[test]
    fn randomize_units_respects_compatibility() {
        let mut state = BoardState::new(Mode::NorthSouth);
        for cell in Mode::NorthSouth.territory(Player::Red) {
            if cell.row < 3 {
                state.set_terrain(cell, Terrain::Desert);
            }
        }
        let mut rng = seeded();
        randomize_units(&mut state, Player::Red, &mut rng);
        for (cell, piece) in state.pieces_of(Player::Red) {
            assert!(
                state.terrain_at(cell).admits(piece.role),
                "{:?} placed on {:?}",
                piece.role,
                state.terrain_at(cell)
            );
        }
        assert!(conservation_holds(&state, Player::Red));
    }

    #[test]
    fn randomize_units_is_deterministic_per_seed() {
        let mut a = BoardState::new(Mode::FourPlayer);
        let mut b = BoardState::new(Mode::FourPlayer);
        randomize_units(&mut a, Player::Red, &mut StdRng::seed_from_u64(7));
        randomize_units(&mut b, Player::Red, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn randomize_terrain_meets_quota() {
        let mut state = BoardState::new(Mode::NorthSouth);
        let mut rng = seeded();
        randomize_terrain(&mut state, Player::Red, &mut rng);
        assert_eq!(state.placed_terrain_count(Player::Red), 16);
        assert!(state.inventory(Player::Red).terrain_empty());
    }

    #[test]
    fn randomize_terrain_avoids_incompatible_occupants() {
        let mut state = BoardState::new(Mode::NorthSouth);
        apply_classical(&mut state, Player::Red);
        let mut rng = seeded();
        randomize_terrain(&mut state, Player::Red, &mut rng);
        for (cell, piece) in state.pieces_of(Player::Red) {
            assert!(state.terrain_at(cell).admits(piece.role));
        }
    }

    #[test]
    fn mirror_board_point_reflects_layout() {
        let mut state = BoardState::new(Mode::NorthSouth);
        apply_classical(&mut state, Player::Red);
        state.set_terrain(Cell::new(3, 3), Terrain::Forest);
        mirror_board(&mut state, Player::Red);

        for cell in Mode::NorthSouth.territory(Player::Red) {
            let target = cell.reflected();
            assert_eq!(state.terrain_at(target), state.terrain_at(cell));
            match state.piece_at(cell) {
                Some(piece) => {
                    let mirrored = state.piece_at(target).expect("missing mirrored piece");
                    assert_eq!(mirrored.role, piece.role);
                    assert_eq!(mirrored.owner, Player::Blue);
                }
                None => assert!(state.piece_at(target).is_none()),
            }
        }
        assert!(conservation_holds(&state, Player::Blue));
        assert!(state.inventory(Player::Blue).pieces_empty());
    }

    #[test]
    fn mirror_board_quadrants_pair_diagonally() {
        let mut state = BoardState::new(Mode::FourPlayer);
        apply_classical(&mut state, Player::Red);
        mirror_board(&mut state, Player::Red);
        assert_eq!(state.pieces_of(Player::Yellow).count(), 16);
        assert!(state.pieces_of(Player::Blue).next().is_none());
    }

    #[test]
    fn reset_units_restores_full_inventory() {
        let mut state = BoardState::new(Mode::NorthSouth);
        apply_classical(&mut state, Player::Red);
        reset_units(&mut state, Player::Red);
        assert_eq!(state.pieces_of(Player::Red).count(), 0);
        assert!(conservation_holds(&state, Player::Red));
        assert_eq!(
            state.inventory(Player::Red).piece_count(Role::Infantry),
            8
        );
    }

    #[test]
    fn reset_terrain_restores_balanced_pool() {
        let mut state = BoardState::new(Mode::NorthSouth);
        randomize_terrain(&mut state, Player::Red, &mut seeded());
        reset_terrain(&mut state, Player::Red);
        assert_eq!(state.placed_terrain_count(Player::Red), 0);
        for kind in PLACEABLE_TERRAIN {
            assert_eq!(state.inventory(Player::Red).terrain_count(kind), 4);
        }
    }
}
