use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::resolver::{self, Move};
use crate::types::{GameResult, GameSnapshot, Outcome, Position, Side};

/// Turn state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingMove(Side),
    GameOver(Outcome),
}

/// One game session: owns the board and sequences the turns.
///
/// Invariant: in `AwaitingMove(side)`, `side` has at least one legal move.
/// Sides without moves are skipped, and the game ends as soon as neither
/// side can move.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: TurnState,
    black_has_moves: bool,
    white_has_moves: bool,
    last_flipped: Vec<Position>,
    last_skipped: Option<Side>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self::from_board(Board::new(), config.starting_side)
    }

    /// Starts a session from an arbitrary position with `side` to move.
    /// The turn state is resolved immediately, so a side without moves is
    /// skipped and a blocked position starts as game over.
    #[instrument(level = "debug", skip(board))]
    pub fn from_board(board: Board, side: Side) -> Self {
        let mut game = Self {
            board,
            state: TurnState::AwaitingMove(side),
            black_has_moves: true,
            white_has_moves: true,
            last_flipped: Vec::new(),
            last_skipped: None,
        };
        game.check_terminal_and_advance();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Side to move, or `None` once the game is over.
    pub fn side_to_move(&self) -> Option<Side> {
        match self.state {
            TurnState::AwaitingMove(side) => Some(side),
            TurnState::GameOver(_) => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, TurnState::GameOver(_))
    }

    pub fn result(&self) -> Option<Outcome> {
        match self.state {
            TurnState::GameOver(outcome) => Some(outcome),
            TurnState::AwaitingMove(_) => None,
        }
    }

    pub fn count(&self, side: Side) -> u8 {
        self.board.count(side)
    }

    /// Whether `side` had a legal move at the last turn resolution.
    pub fn has_moves(&self, side: Side) -> bool {
        match side {
            Side::Black => self.black_has_moves,
            Side::White => self.white_has_moves,
        }
    }

    /// Positions flipped by the most recent move.
    pub fn last_flipped(&self) -> &[Position] {
        &self.last_flipped
    }

    /// Side whose turn was skipped by the most recent transition, if any.
    pub fn last_skipped(&self) -> Option<Side> {
        self.last_skipped
    }

    /// Pass message for the side skipped by the most recent transition.
    pub fn pass_announcement(&self) -> Option<String> {
        self.last_skipped.map(Side::pass_announcement)
    }

    pub fn legal_moves_for(&self, side: Side) -> Vec<Move> {
        resolver::legal_moves(&self.board, side)
    }

    /// Plays `side` at `destination`, flips the captured runs and advances
    /// the turn. On error nothing is changed.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, side: Side, destination: Position) -> Result<(), GameError> {
        if !destination.is_on_board() {
            return Err(GameError::OutOfBounds {
                row: destination.row as usize,
                col: destination.col as usize,
            });
        }

        let illegal = GameError::IllegalMove {
            side,
            row: destination.row as usize,
            col: destination.col as usize,
        };
        if self.side_to_move() != Some(side) {
            warn!(state = ?self.state, "move submitted out of turn");
            return Err(illegal);
        }

        let Some(mv) = self
            .legal_moves_for(side)
            .into_iter()
            .find(|mv| mv.destination == destination)
        else {
            warn!("destination is not a legal move");
            return Err(illegal);
        };

        self.board.place(side, destination, mv.flips())?;
        self.last_flipped = mv.flips().collect();
        self.last_skipped = None;
        self.state = TurnState::AwaitingMove(side.opponent());
        debug!(flipped = self.last_flipped.len(), "move applied");

        self.check_terminal_and_advance();
        Ok(())
    }

    /// Resolves whose turn it is: keeps the side to move if it can play,
    /// otherwise skips it, and ends the game when neither side can move.
    pub fn check_terminal_and_advance(&mut self) {
        let TurnState::AwaitingMove(next) = self.state else {
            return;
        };

        let next_has = resolver::has_legal_move(&self.board, next);
        let other_has = resolver::has_legal_move(&self.board, next.opponent());
        self.set_has_moves(next, next_has);
        self.set_has_moves(next.opponent(), other_has);

        match (next_has, other_has) {
            (true, _) => {}
            (false, true) => {
                info!(skipped = %next, "no legal moves, passing");
                self.last_skipped = Some(next);
                self.state = TurnState::AwaitingMove(next.opponent());
            }
            (false, false) => {
                let black_count = self.board.count(Side::Black);
                let white_count = self.board.count(Side::White);
                let outcome = Outcome::from_counts(black_count, white_count);
                info!(black_count, white_count, ?outcome, "game over");
                self.state = TurnState::GameOver(outcome);
            }
        }
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        let legal_moves = match self.side_to_move() {
            Some(side) => self
                .legal_moves_for(side)
                .into_iter()
                .map(|mv| mv.destination)
                .collect(),
            None => Vec::new(),
        };

        GameSnapshot {
            board: self.board.to_array().to_vec(),
            current_player: self.side_to_move().map_or(0, Side::player_number),
            black_count: self.board.count(Side::Black),
            white_count: self.board.count(Side::White),
            is_game_over: self.is_game_over(),
            is_pass: self.last_skipped.is_some(),
            flipped: self.last_flipped.iter().map(|p| p.index() as u8).collect(),
            legal_moves,
        }
    }

    /// Final score, available once the game is over.
    pub fn to_game_result(&self) -> Option<GameResult> {
        let outcome = self.result()?;
        Some(GameResult {
            winner: match outcome {
                Outcome::Winner(side) => side.player_number(),
                Outcome::Tie => 0,
            },
            black_count: self.board.count(Side::Black),
            white_count: self.board.count(Side::White),
        })
    }

    fn set_has_moves(&mut self, side: Side, has_moves: bool) {
        match side {
            Side::Black => self.black_has_moves = has_moves,
            Side::White => self.white_has_moves = has_moves,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
