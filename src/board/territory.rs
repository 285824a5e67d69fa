//! Board geometry per game mode.
//!
//! Territory membership, forward directions, promotion lines, terrain
//! quotas, team pairings, and mirror partners are all pure functions of
//! mode and coordinates; nothing here is stored on the board.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, BOARD_SIZE};
use super::piece::Player;

/// The four board geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Two players on north/south halves: Red north, Blue south.
    NorthSouth,
    /// Two players on west/east halves: Red west, Blue east.
    EastWest,
    /// Four players, one quadrant each, free-for-all.
    FourPlayer,
    /// Four players in quadrants, diagonal partners as teams:
    /// Red + Yellow versus Blue + Green.
    TwoVsTwo,
}

const HALF: i8 = BOARD_SIZE / 2;

impl Mode {
    /// The players seated in this mode, in turn order.
    pub fn players(self) -> &'static [Player] {
        match self {
            Mode::NorthSouth | Mode::EastWest => &[Player::Red, Player::Blue],
            Mode::FourPlayer | Mode::TwoVsTwo => {
                &[Player::Red, Player::Blue, Player::Green, Player::Yellow]
            }
        }
    }

    /// The player whose territory contains the given cell. Every cell
    /// belongs to exactly one territory.
    pub fn owner_of(self, cell: Cell) -> Player {
        match self {
            Mode::NorthSouth => {
                if cell.row < HALF {
                    Player::Red
                } else {
                    Player::Blue
                }
            }
            Mode::EastWest => {
                if cell.col < HALF {
                    Player::Red
                } else {
                    Player::Blue
                }
            }
            Mode::FourPlayer | Mode::TwoVsTwo => match (cell.row < HALF, cell.col < HALF) {
                (true, true) => Player::Red,
                (true, false) => Player::Blue,
                (false, true) => Player::Green,
                (false, false) => Player::Yellow,
            },
        }
    }

    /// Returns true if the cell lies in the player's own territory.
    pub fn contains(self, player: Player, cell: Cell) -> bool {
        self.owner_of(cell) == player
    }

    /// Iterates the cells of a player's territory.
    pub fn territory(self, player: Player) -> impl Iterator<Item = Cell> {
        Cell::all().filter(move |&c| self.owner_of(c) == player)
    }

    /// The player's forward direction: toward the opposing half, or
    /// diagonally toward the opposite corner in quadrant modes.
    pub fn forward(self, player: Player) -> (i8, i8) {
        match self {
            Mode::NorthSouth => match player {
                Player::Red => (1, 0),
                _ => (-1, 0),
            },
            Mode::EastWest => match player {
                Player::Red => (0, 1),
                _ => (0, -1),
            },
            Mode::FourPlayer | Mode::TwoVsTwo => match player {
                Player::Red => (1, 1),
                Player::Blue => (1, -1),
                Player::Green => (-1, 1),
                Player::Yellow => (-1, -1),
            },
        }
    }

    /// Returns true if an Infantry of the player promotes on this cell:
    /// the far rank/file in half-board modes, either far edge along the
    /// forward diagonal in quadrant modes.
    pub fn is_promotion_cell(self, player: Player, cell: Cell) -> bool {
        let (fr, fc) = self.forward(player);
        let far_row = if fr > 0 { BOARD_SIZE - 1 } else { 0 };
        let far_col = if fc > 0 { BOARD_SIZE - 1 } else { 0 };
        (fr != 0 && cell.row == far_row) || (fc != 0 && cell.col == far_col)
    }

    /// Non-Flat terrain cells each player must have in their territory
    /// before combat can begin.
    pub const fn terrain_quota(self) -> usize {
        match self {
            Mode::NorthSouth | Mode::EastWest => 16,
            Mode::FourPlayer | Mode::TwoVsTwo => 8,
        }
    }

    /// The territory paired with the player's by point reflection through
    /// the board center.
    pub fn mirror_partner(self, player: Player) -> Player {
        match self {
            Mode::NorthSouth | Mode::EastWest => match player {
                Player::Red => Player::Blue,
                _ => Player::Red,
            },
            Mode::FourPlayer | Mode::TwoVsTwo => match player {
                Player::Red => Player::Yellow,
                Player::Yellow => Player::Red,
                Player::Blue => Player::Green,
                Player::Green => Player::Blue,
            },
        }
    }

    /// Returns true if the two players fight on the same side.
    pub fn allied(self, a: Player, b: Player) -> bool {
        if a == b {
            return true;
        }
        match self {
            Mode::TwoVsTwo => self.mirror_partner(a) == b,
            _ => false,
        }
    }

    /// Returns true if a piece of `a` may capture or check a piece of `b`.
    pub fn hostile(self, a: Player, b: Player) -> bool {
        !self.allied(a, b)
    }

    /// Progress of a cell along the player's forward direction, from 0 at
    /// the home edge to 11 at the far edge.
    pub fn advancement(self, player: Player, cell: Cell) -> i32 {
        let (fr, fc) = self.forward(player);
        let row_adv = match fr {
            1 => cell.row as i32,
            -1 => (BOARD_SIZE - 1 - cell.row) as i32,
            _ => 0,
        };
        let col_adv = match fc {
            1 => cell.col as i32,
            -1 => (BOARD_SIZE - 1 - cell.col) as i32,
            _ => 0,
        };
        if fr != 0 && fc != 0 {
            (row_adv + col_adv) / 2
        } else {
            row_adv + col_adv
        }
    }
}
