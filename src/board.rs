use std::fmt;
use std::str::FromStr;

use crate::error::{GameError, ParseBoardError};
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Position, Side};

/// Reversi board state as a row-major grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.put(Position::new(3, 3), Cell::White);
        board.put(Position::new(3, 4), Cell::Black);
        board.put(Position::new(4, 3), Cell::Black);
        board.put(Position::new(4, 4), Cell::White);
        board
    }

    /// A board with every square empty.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        Ok(self.cells[checked_index(row, col)?])
    }

    /// Overwrites one square. Does not check legality.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GameError> {
        self.cells[checked_index(row, col)?] = cell;
        Ok(())
    }

    /// Number of squares holding `side`'s pieces.
    pub fn count(&self, side: Side) -> u8 {
        let cell = side.cell();
        self.cells.iter().filter(|&&c| c == cell).count() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.count(Side::Black) - self.count(Side::White)
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Positions occupied by `side`, in row-major order.
    pub fn positions_of(&self, side: Side) -> impl Iterator<Item = Position> + '_ {
        let cell = side.cell();
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == cell)
            .map(|(index, _)| Position::from_index(index))
    }

    /// Places `side` on `destination` and recolors every position in `flips`.
    /// Does not check legality. Every position is bounds-checked before
    /// anything is written, so an error leaves the board unchanged.
    pub fn place<I>(
        &mut self,
        side: Side,
        destination: Position,
        flips: I,
    ) -> Result<(), GameError>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut targets = vec![checked_position(destination)?];
        for pos in flips {
            targets.push(checked_position(pos)?);
        }

        let cell = side.cell();
        for index in targets {
            self.cells[index] = cell;
        }
        Ok(())
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (out, cell) in board.iter_mut().zip(self.cells.iter()) {
            *out = cell.to_u8();
        }
        board
    }

    /// Reads a square addressed by an in-bounds position.
    pub(crate) fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    fn put(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_index(row: usize, col: usize) -> Result<usize, GameError> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(GameError::OutOfBounds { row, col });
    }
    Ok(row * BOARD_SIZE + col)
}

fn checked_position(pos: Position) -> Result<usize, GameError> {
    checked_index(pos.row as usize, pos.col as usize)
}

/// Renders eight lines of `.`, `X` and `O`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the notation produced by `Display`. Blank lines and whitespace
/// between symbols are ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowLength {
                    row,
                    len: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell =
                    Cell::from_symbol(symbol).ok_or(ParseBoardError::Symbol { row, symbol })?;
                board.put(Position::new(row as u8, col as u8), cell);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_has_diagonal_center() {
        let board = Board::new();

        assert_eq!(board.cell_at(3, 3), Ok(Cell::White));
        assert_eq!(board.cell_at(3, 4), Ok(Cell::Black));
        assert_eq!(board.cell_at(4, 3), Ok(Cell::Black));
        assert_eq!(board.cell_at(4, 4), Ok(Cell::White));
        assert_eq!(board.count(Side::Black), 2);
        assert_eq!(board.count(Side::White), 2);
        assert_eq!(board.empty_count(), 60);
        assert!(!board.is_full());
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(
            board.cell_at(8, 0),
            Err(GameError::OutOfBounds { row: 8, col: 0 })
        );
        assert_eq!(
            board.set_cell(0, 8, Cell::Black),
            Err(GameError::OutOfBounds { row: 0, col: 8 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn set_cell_overwrites_without_checks() {
        let mut board = Board::new();

        board.set_cell(3, 3, Cell::Black).unwrap();
        board.set_cell(0, 0, Cell::White).unwrap();

        assert_eq!(board.count(Side::Black), 3);
        assert_eq!(board.count(Side::White), 2);
        assert_eq!(board.cell_at(0, 0), Ok(Cell::White));
    }

    #[test]
    fn place_recolors_flips() {
        let mut board = Board::new();

        board
            .place(Side::Black, Position::new(2, 3), [Position::new(3, 3)])
            .unwrap();

        assert_eq!(board.count(Side::Black), 4);
        assert_eq!(board.count(Side::White), 1);
        let cells = board.to_array();
        assert_eq!(cells[2 * 8 + 3], 1);
        assert_eq!(cells[3 * 8 + 3], 1);
        assert_eq!(cells[4 * 8 + 4], 2);
    }

    #[test]
    fn place_rejects_off_board_positions() {
        let mut board = Board::empty();

        assert_eq!(
            board.place(Side::Black, Position::new(0, 9), []),
            Err(GameError::OutOfBounds { row: 0, col: 9 })
        );
        assert_eq!(
            board.place(Side::Black, Position::new(8, 0), []),
            Err(GameError::OutOfBounds { row: 8, col: 0 })
        );
        assert_eq!(board.cell_at(1, 1), Ok(Cell::Empty));
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn place_with_off_board_flip_writes_nothing() {
        let mut board = Board::new();
        let before = board;

        let result = board.place(
            Side::Black,
            Position::new(2, 3),
            [Position::new(3, 3), Position::new(3, 8)],
        );

        assert_eq!(result, Err(GameError::OutOfBounds { row: 3, col: 8 }));
        assert_eq!(board, before);
    }

    #[test]
    fn display_uses_text_symbols() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3], "...OX...");
        assert_eq!(lines[4], "...XO...");
        assert_eq!(text.parse::<Board>(), Ok(Board::new()));
    }

    #[test]
    fn parse_accepts_spaced_rows() {
        let board: Board = "
            X O . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . O
        "
        .parse()
        .unwrap();

        assert_eq!(board.cell_at(0, 0), Ok(Cell::Black));
        assert_eq!(board.cell_at(0, 1), Ok(Cell::White));
        assert_eq!(board.cell_at(7, 7), Ok(Cell::White));
        assert_eq!(board.empty_count(), 61);
    }

    #[test]
    fn parse_reports_bad_input() {
        assert_eq!("X".parse::<Board>(), Err(ParseBoardError::RowCount(1)));

        let short = "........\n".repeat(7) + ".......";
        assert_eq!(
            short.parse::<Board>(),
            Err(ParseBoardError::RowLength { row: 7, len: 7 })
        );

        let bad = "*.......\n".to_string() + &"........\n".repeat(7);
        assert_eq!(
            bad.parse::<Board>(),
            Err(ParseBoardError::Symbol { row: 0, symbol: '*' })
        );
    }

    #[test]
    fn full_board_is_detected() {
        let text = "XXXXXXXX\n".repeat(4) + &"OOOOOOOO\n".repeat(4);
        let board: Board = text.parse().unwrap();

        assert!(board.is_full());
        assert_eq!(board.empty_count(), 0);
        assert_eq!(board.count(Side::Black), 32);
    }
}
