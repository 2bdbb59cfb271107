use super::board::Cell;

/// The two token colors. `A` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::A => Cell::A,
            Player::B => Cell::B,
        }
    }

    /// Owner of an occupied cell
    pub fn from_cell(cell: Cell) -> Option<Player> {
        match cell {
            Cell::A => Some(Player::A),
            Cell::B => Some(Player::B),
            Cell::Empty => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::A => "Red",
            Player::B => "Yellow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::A.other(), Player::B);
        assert_eq!(Player::B.other(), Player::A);
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(Player::from_cell(Player::A.to_cell()), Some(Player::A));
        assert_eq!(Player::from_cell(Player::B.to_cell()), Some(Player::B));
        assert_eq!(Player::from_cell(Cell::Empty), None);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::A.name(), "Red");
        assert_eq!(Player::B.name(), "Yellow");
    }
}
