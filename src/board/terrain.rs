//! Terrain kinds and the role/terrain compatibility matrix.
//!
//! The same matrix drives setup placement and movement entry: a terrain
//! kind is a sanctuary for exactly the roles it does not reject. Desert is
//! special in movement terms (everything may enter, nothing may slide
//! through, lingering is fatal) and in placement terms (HeavyArmor only).

use serde::{Deserialize, Serialize};

use super::piece::Role;

/// The five terrain kinds a cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Flat,
    Forest,
    Swamp,
    Mountain,
    Desert,
}

pub const TERRAIN_COUNT: usize = 5;

pub const ALL_TERRAIN: [Terrain; TERRAIN_COUNT] = [
    Terrain::Flat,
    Terrain::Forest,
    Terrain::Swamp,
    Terrain::Mountain,
    Terrain::Desert,
];

/// The four placeable (non-Flat) kinds, smallest to largest cluster bias.
pub const PLACEABLE_TERRAIN: [Terrain; 4] = [
    Terrain::Swamp,
    Terrain::Mountain,
    Terrain::Forest,
    Terrain::Desert,
];

impl Terrain {
    /// Returns whether a piece of the given role may be placed on (or
    /// stand on) this terrain during setup.
    pub const fn admits(self, role: Role) -> bool {
        match self {
            Terrain::Flat => true,
            Terrain::Desert => matches!(role, Role::HeavyArmor),
            Terrain::Forest => !matches!(role, Role::HeavyArmor | Role::Cavalry),
            Terrain::Swamp => !matches!(role, Role::Cavalry | Role::Ranged),
            Terrain::Mountain => !matches!(role, Role::HeavyArmor | Role::Ranged),
        }
    }

    /// Returns whether this terrain bars the given role from entering the
    /// cell during movement. Desert never bars entry: every role may land
    /// there (the desert rule punishes staying), but no slide passes
    /// through it.
    pub const fn bars_entry(self, role: Role) -> bool {
        match self {
            Terrain::Flat | Terrain::Desert => false,
            _ => !self.admits(role),
        }
    }

    /// Base cluster size used by the terrain generator. Swamps grow in
    /// small pockets, deserts in large fields.
    pub const fn cluster_size(self) -> usize {
        match self {
            Terrain::Flat => 0,
            Terrain::Swamp => 2,
            Terrain::Mountain => 3,
            Terrain::Forest => 4,
            Terrain::Desert => 5,
        }
    }
}
