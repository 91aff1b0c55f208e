use crate::types::Side;

/// Errors returned by board and game operations. Both kinds are recoverable:
/// the state is left untouched and the caller may simply retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },

    #[error("illegal move for {side}: ({row}, {col})")]
    IllegalMove { side: Side, row: usize, col: usize },
}

/// Errors from parsing the text board notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row}: expected 8 cells, got {len}")]
    RowLength { row: usize, len: usize },

    #[error("row {row}: unknown cell symbol {symbol:?}")]
    Symbol { row: usize, symbol: char },
}
