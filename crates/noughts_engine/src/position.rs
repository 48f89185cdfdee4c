//! Named board cells.

use crate::types::Board;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A cell of the board by name.
///
/// Front-ends work with these; the engine itself works with the cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Top-left (cell 0)
    TopLeft,
    /// Top-center (cell 1)
    TopCenter,
    /// Top-right (cell 2)
    TopRight,
    /// Middle-left (cell 3)
    MiddleLeft,
    /// Center (cell 4)
    Center,
    /// Middle-right (cell 5)
    MiddleRight,
    /// Bottom-left (cell 6)
    BottomLeft,
    /// Bottom-center (cell 7)
    BottomCenter,
    /// Bottom-right (cell 8)
    BottomRight,
}

impl Position {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Parses player input: a 1-based cell number (as drawn on the board)
    /// or a label, case-insensitively.
    #[instrument]
    pub fn parse(input: &str) -> Option<Position> {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return number.checked_sub(1).and_then(Self::from_index);
        }

        let wanted = normalize(input);
        if wanted.is_empty() {
            return None;
        }
        Position::iter().find(|pos| normalize(pos.label()) == wanted)
    }

    /// Converts to the board cell index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a position from a board cell index.
    pub fn from_index(index: usize) -> Option<Self> {
        Position::iter().nth(index)
    }

    /// Positions whose cells are still empty.
    #[instrument(skip(board))]
    pub fn available(board: &Board) -> Vec<Position> {
        board
            .available_cells()
            .into_iter()
            .filter_map(Self::from_index)
            .collect()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_index_round_trip_matches_row_major_order() {
        assert_eq!(Position::TopLeft.to_index(), 0);
        assert_eq!(Position::Center.to_index(), 4);
        assert_eq!(Position::BottomRight.to_index(), 8);
        assert_eq!(Position::from_index(5), Some(Position::MiddleRight));
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_numbers_are_one_based() {
        assert_eq!(Position::parse("1"), Some(Position::TopLeft));
        assert_eq!(Position::parse(" 9 "), Some(Position::BottomRight));
        assert_eq!(Position::parse("0"), None);
        assert_eq!(Position::parse("10"), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(Position::parse("center"), Some(Position::Center));
        assert_eq!(Position::parse("Top-Left"), Some(Position::TopLeft));
        assert_eq!(Position::parse("bottom center"), Some(Position::BottomCenter));
        assert_eq!(Position::parse("middle"), None);
        assert_eq!(Position::parse(""), None);
    }

    #[test]
    fn test_available_skips_occupied() {
        let mut board = Board::new();
        board.apply_move(Player::Human, 0).unwrap();
        board.apply_move(Player::Computer, 4).unwrap();
        let open = Position::available(&board);
        assert_eq!(open.len(), 7);
        assert!(!open.contains(&Position::TopLeft));
        assert!(!open.contains(&Position::Center));
    }
}
