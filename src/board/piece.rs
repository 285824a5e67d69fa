//! Piece roles, players, and the canonical roster.

use serde::{Deserialize, Serialize};

/// The six piece roles, occupying the classic chess role space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// King-equivalent; losing it eliminates the player.
    Leader,
    /// Queen-equivalent: cavalry jumps plus both slider patterns.
    Elite,
    /// Rook-equivalent orthogonal slider.
    HeavyArmor,
    /// Bishop-equivalent diagonal slider.
    Ranged,
    /// Knight-equivalent jumper.
    Cavalry,
    /// Pawn-equivalent; promotes to Elite on the far line.
    Infantry,
}

pub const ROLE_COUNT: usize = 6;

pub const ALL_ROLES: [Role; ROLE_COUNT] = [
    Role::Leader,
    Role::Elite,
    Role::HeavyArmor,
    Role::Ranged,
    Role::Cavalry,
    Role::Infantry,
];

impl Role {
    /// How many of this role each player starts with.
    pub const fn roster_count(self) -> u8 {
        match self {
            Role::Leader | Role::Elite => 1,
            Role::HeavyArmor | Role::Ranged | Role::Cavalry => 2,
            Role::Infantry => 8,
        }
    }

    /// Total pieces in one player's canonical roster.
    pub const fn roster_total() -> u8 {
        16
    }
}

/// A seat at the board. Two-player modes use Red and Blue only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    Red,
    Blue,
    Green,
    Yellow,
}

pub const PLAYER_COUNT: usize = 4;

pub const ALL_PLAYERS: [Player; PLAYER_COUNT] =
    [Player::Red, Player::Blue, Player::Green, Player::Yellow];

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub role: Role,
    pub owner: Player,
}

impl Piece {
    pub const fn new(role: Role, owner: Player) -> Piece {
        Piece { role, owner }
    }
}
