//! Legal-move computation by directional ray search.
//!
//! [`legal_moves`] walks outward from every piece of the moving side and
//! collects the empty squares that close off a run of opposing pieces.
//! [`move_at`] answers the same question for a single landing square by
//! scanning inward from it; the two must always agree.

use std::collections::BTreeMap;

use crate::board::Board;
use crate::types::{Cell, Direction, Position, Side};

/// A run of opposing pieces captured along one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Direction pointing from the destination towards the bracketing piece.
    pub direction: Direction,
    /// Captured positions, nearest to the destination first.
    pub run: Vec<Position>,
}

/// A legal destination together with everything it flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub destination: Position,
    /// One entry per capturing direction, in [`Direction`] order.
    pub captures: Vec<Capture>,
}

impl Move {
    /// Every position flipped by this move.
    pub fn flips(&self) -> impl Iterator<Item = Position> + '_ {
        self.captures.iter().flat_map(|c| c.run.iter().copied())
    }

    pub fn flip_count(&self) -> usize {
        self.captures.iter().map(|c| c.run.len()).sum()
    }
}

/// Returns all legal moves for `side`, sorted by `(row, col)`.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let opponent = side.opponent().cell();
    let mut found: BTreeMap<Position, BTreeMap<Direction, Vec<Position>>> = BTreeMap::new();

    for origin in board.positions_of(side) {
        for direction in Direction::ALL {
            if let Some((landing, mut run)) = walk(board, origin, direction, opponent) {
                run.reverse();
                found
                    .entry(landing)
                    .or_default()
                    .insert(direction.reverse(), run);
            }
        }
    }

    found
        .into_iter()
        .map(|(destination, captures)| Move {
            destination,
            captures: captures
                .into_iter()
                .map(|(direction, run)| Capture { direction, run })
                .collect(),
        })
        .collect()
}

/// Returns whether `side` has at least one legal move.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    let opponent = side.opponent().cell();
    board.positions_of(side).any(|origin| {
        Direction::ALL
            .into_iter()
            .any(|direction| walk(board, origin, direction, opponent).is_some())
    })
}

/// Evaluates a single landing square for `side`.
/// Returns `None` when the square is occupied or captures nothing.
pub fn move_at(board: &Board, side: Side, destination: Position) -> Option<Move> {
    if !destination.is_on_board() || board.get(destination) != Cell::Empty {
        return None;
    }

    let me = side.cell();
    let opp = side.opponent().cell();
    let mut captures = Vec::new();

    for direction in Direction::ALL {
        let mut run = Vec::new();
        let mut cursor = destination.step(direction);

        while let Some(pos) = cursor {
            let cell = board.get(pos);
            if cell == opp {
                run.push(pos);
            } else {
                if cell == me && !run.is_empty() {
                    captures.push(Capture { direction, run });
                }
                break;
            }
            cursor = pos.step(direction);
        }
    }

    (!captures.is_empty()).then_some(Move {
        destination,
        captures,
    })
}

/// Walks from `origin` across opposing pieces. Yields the empty landing
/// square and the run crossed, origin side first.
fn walk(
    board: &Board,
    origin: Position,
    direction: Direction,
    opponent: Cell,
) -> Option<(Position, Vec<Position>)> {
    let mut run = Vec::new();
    let mut cursor = origin.step(direction)?;

    while board.get(cursor) == opponent {
        run.push(cursor);
        cursor = cursor.step(direction)?;
    }

    (board.get(cursor) == Cell::Empty && !run.is_empty()).then_some((cursor, run))
}
