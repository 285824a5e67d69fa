//! Procedural terrain synthesis.
//!
//! Fills each territory's non-Flat quota with organically grown clusters:
//! pick a kind (each kind has its own cluster-size bias), seed it on a
//! random flat cell, then repeatedly annex the flat neighbor with the
//! highest same-cluster adjacency score plus jitter. Non-master
//! territories are derived from the master pattern by the chosen symmetry,
//! or grown independently under `Chaos`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Cell, Mode, Player, Terrain, BOARD_SIZE, PLACEABLE_TERRAIN};

const N: usize = BOARD_SIZE as usize;

/// A bare terrain layout, separate from any board state.
pub type TerrainGrid = [[Terrain; N]; N];

/// How non-master territories relate to the master pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symmetry {
    /// Axis reflections for adjacent quadrants, point reflection for the
    /// opposite territory. Point reflection in two-player modes.
    Mirror,
    /// Successive quarter-turns about the center. Point reflection in
    /// two-player modes.
    Rotational,
    /// Every territory grown independently from an offset seed.
    Chaos,
}

/// Per-territory seed spread for `Chaos` generation.
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

fn grid_at(grid: &TerrainGrid, cell: Cell) -> Terrain {
    grid[cell.row as usize][cell.col as usize]
}

fn grid_set(grid: &mut TerrainGrid, cell: Cell, kind: Terrain) {
    grid[cell.row as usize][cell.col as usize] = kind;
}

/// Generates a fresh terrain layout for the mode. Deterministic for a
/// given (mode, seed, symmetry) triple.
pub fn generate(mode: Mode, seed: u64, symmetry: Symmetry) -> TerrainGrid {
    let mut grid = [[Terrain::Flat; N]; N];
    let players = mode.players();

    match symmetry {
        Symmetry::Chaos => {
            for (i, &player) in players.iter().enumerate() {
                let mut rng = SmallRng::seed_from_u64(seed.wrapping_add((i as u64).wrapping_mul(SEED_STRIDE)));
                fill_territory(&mut grid, mode, player, &mut rng);
            }
        }
        Symmetry::Mirror | Symmetry::Rotational => {
            let master = players[0];
            let mut rng = SmallRng::seed_from_u64(seed);
            fill_territory(&mut grid, mode, master, &mut rng);
            for &player in &players[1..] {
                for cell in mode.territory(master) {
                    let kind = grid_at(&grid, cell);
                    if kind != Terrain::Flat {
                        grid_set(&mut grid, derive_cell(mode, symmetry, player, cell), kind);
                    }
                }
            }
        }
    }
    grid
}

/// Maps a master-territory cell into the target player's territory under
/// the given symmetry.
fn derive_cell(mode: Mode, symmetry: Symmetry, target: Player, cell: Cell) -> Cell {
    let last = BOARD_SIZE - 1;
    match mode {
        // Two-player modes have a single partner: point reflection.
        Mode::NorthSouth | Mode::EastWest => cell.reflected(),
        Mode::FourPlayer | Mode::TwoVsTwo => match (symmetry, target) {
            (_, Player::Yellow) => cell.reflected(),
            (Symmetry::Rotational, Player::Blue) => Cell::new(cell.col, last - cell.row),
            (Symmetry::Rotational, _) => Cell::new(last - cell.col, cell.row),
            (_, Player::Blue) => Cell::new(cell.row, last - cell.col),
            (_, _) => Cell::new(last - cell.row, cell.col),
        },
    }
}

/// Grows clusters inside one territory until its non-Flat quota is met.
fn fill_territory(grid: &mut TerrainGrid, mode: Mode, player: Player, rng: &mut impl Rng) {
    let quota = mode.terrain_quota();
    let cells: Vec<Cell> = mode.territory(player).collect();
    let mut placed = cells
        .iter()
        .filter(|&&c| grid_at(grid, c) != Terrain::Flat)
        .count();

    while placed < quota {
        let kind = PLACEABLE_TERRAIN[rng.gen_range(0..PLACEABLE_TERRAIN.len())];
        let target = kind.cluster_size().min(quota - placed);

        let flat: Vec<Cell> = cells
            .iter()
            .copied()
            .filter(|&c| grid_at(grid, c) == Terrain::Flat)
            .collect();
        if flat.is_empty() {
            break;
        }

        let seed_cell = flat[rng.gen_range(0..flat.len())];
        grid_set(grid, seed_cell, kind);
        placed += 1;
        let mut cluster = vec![seed_cell];

        for _ in 1..target {
            match best_frontier_cell(grid, &cells, &cluster, rng) {
                Some(next) => {
                    grid_set(grid, next, kind);
                    cluster.push(next);
                    placed += 1;
                }
                None => break,
            }
        }
    }
}

/// Picks the flat in-territory cell adjacent to the cluster with the
/// highest score: orthogonal same-cluster neighbors count 1.0, diagonal
/// 0.7, plus uniform jitter to keep blobs organic.
fn best_frontier_cell(
    grid: &TerrainGrid,
    territory: &[Cell],
    cluster: &[Cell],
    rng: &mut impl Rng,
) -> Option<Cell> {
    let mut best: Option<(Cell, f32)> = None;
    for &cell in territory {
        if grid_at(grid, cell) != Terrain::Flat {
            continue;
        }
        let mut adjacency = 0.0f32;
        for neighbor in cell.neighbors() {
            if cluster.contains(&neighbor) {
                let diagonal = neighbor.row != cell.row && neighbor.col != cell.col;
                adjacency += if diagonal { 0.7 } else { 1.0 };
            }
        }
        if adjacency == 0.0 {
            continue;
        }
        let score = adjacency + rng.gen::<f32>() * 0.5;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((cell, score));
        }
    }
    best.map(|(c, _)| c)
}

/// Writes a generated layout onto a board, then reverts to Flat any cell
/// whose standing piece is incompatible with the new terrain: placement
/// always wins over generation.
pub fn apply_generated(state: &mut BoardState, grid: &TerrainGrid) {
    for cell in Cell::all() {
        let mut kind = grid_at(grid, cell);
        if let Some(piece) = state.piece_at(cell) {
            if !kind.admits(piece.role) {
                kind = Terrain::Flat;
            }
        }
        state.set_terrain(cell, kind);
    }
}
