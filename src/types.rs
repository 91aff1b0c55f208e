use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        in_bounds(self.row as i32, self.col as i32)
    }

    /// Row-major square index (0..=63). Only meaningful for on-board positions.
    pub(crate) fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    /// Steps one square in `direction`, or `None` when that leaves the board.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        in_bounds(row, col).then(|| Self::new(row as u8, col as u8))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// One of the two players. Black is player 1 and moves first by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn player_number(self) -> u8 {
        match self {
            Side::Black => 1,
            Side::White => 2,
        }
    }

    /// Text-notation symbol for this side's pieces.
    pub fn symbol(self) -> char {
        match self {
            Side::Black => 'X',
            Side::White => 'O',
        }
    }

    /// Message shown when this side has no legal move and loses its turn.
    pub fn pass_announcement(self) -> String {
        format!(
            "No moves for player {}. Player {}'s turn",
            self.player_number(),
            self.opponent().player_number()
        )
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => f.write_str("black"),
            Side::White => f.write_str("white"),
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
        }
    }

    pub fn symbol(self) -> char {
        match self.side() {
            Some(side) => side.symbol(),
            None => '.',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::Black),
            'O' => Some(Cell::White),
            _ => None,
        }
    }

    /// Wire encoding used by snapshots: 0=empty, 1=black, 2=white.
    pub fn to_u8(self) -> u8 {
        self.side().map_or(0, Side::player_number)
    }
}

/// The eight compass directions, ordered clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(row, col)` offset of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Tie,
}

impl Outcome {
    /// Decides the outcome strictly by piece counts.
    pub fn from_counts(black_count: u8, white_count: u8) -> Self {
        if black_count > white_count {
            Outcome::Winner(Side::Black)
        } else if white_count > black_count {
            Outcome::Winner(Side::White)
        } else {
            Outcome::Tie
        }
    }

    pub fn announcement(self) -> String {
        match self {
            Outcome::Winner(side) => format!("Winner is player {}", side.player_number()),
            Outcome::Tie => "It's a tie".to_string(),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: Vec<u8>,
    /// Player number of the side to move; 0 once the game is over.
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the last transition skipped a side without moves.
    /// - `false` otherwise.
    pub is_pass: bool,
    /// Contract:
    /// - After a move: row-major indices (0..=63) of the flipped pieces.
    /// - Before the first move: empty.
    pub flipped: Vec<u8>,
    pub legal_moves: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Player number of the winner; 0 on a tie.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_swaps_sides() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
    }

    #[test]
    fn step_stops_at_board_edge() {
        assert_eq!(Position::new(0, 0).step(Direction::North), None);
        assert_eq!(Position::new(7, 7).step(Direction::SouthEast), None);
        assert_eq!(
            Position::new(3, 3).step(Direction::NorthEast),
            Some(Position::new(2, 4))
        );
    }

    #[test]
    fn reverse_direction_undoes_step() {
        let origin = Position::new(4, 4);
        for direction in Direction::ALL {
            let there = origin.step(direction).unwrap();
            assert_eq!(there.step(direction.reverse()), Some(origin));
        }
    }

    #[test]
    fn outcome_follows_counts() {
        assert_eq!(Outcome::from_counts(33, 31), Outcome::Winner(Side::Black));
        assert_eq!(Outcome::from_counts(10, 54), Outcome::Winner(Side::White));
        assert_eq!(Outcome::from_counts(32, 32), Outcome::Tie);
    }

    #[test]
    fn announcements_name_player_numbers() {
        assert_eq!(
            Outcome::Winner(Side::Black).announcement(),
            "Winner is player 1"
        );
        assert_eq!(
            Outcome::Winner(Side::White).announcement(),
            "Winner is player 2"
        );
        assert_eq!(Outcome::Tie.announcement(), "It's a tie");
    }

    #[test]
    fn pass_announcement_names_both_players() {
        assert_eq!(
            Side::Black.pass_announcement(),
            "No moves for player 1. Player 2's turn"
        );
        assert_eq!(
            Side::White.pass_announcement(),
            "No moves for player 2. Player 1's turn"
        );
    }

    #[test]
    fn cell_symbols_round_trip() {
        for cell in [Cell::Empty, Cell::Black, Cell::White] {
            assert_eq!(Cell::from_symbol(cell.symbol()), Some(cell));
        }
        assert_eq!(Cell::from_symbol('*'), None);
    }
}
