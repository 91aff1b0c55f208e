use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod resolver;
pub mod types;

pub use board::Board;
pub use config::GameConfig;
pub use error::{GameError, ParseBoardError};
pub use game::{Game, TurnState};
pub use resolver::{Capture, Move};
pub use types::{Cell, Direction, GameResult, GameSnapshot, Outcome, Position, Side};

/// The browser session. Every export goes through this mutex, so moves are
/// applied one at a time.
static GAME: Lazy<Mutex<Game>> = Lazy::new(|| Mutex::new(Game::new()));

fn session() -> Result<MutexGuard<'static, Game>, JsValue> {
    GAME.lock()
        .map_err(|_| JsValue::from_str("game session is poisoned"))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

const GAME_OVER: &str = "game is already over";

/// Plays the side to move. Errors carry the message shown to the user.
fn play(game: &mut Game, row: u8, col: u8) -> Result<(), String> {
    let side = game.side_to_move().ok_or_else(|| GAME_OVER.to_string())?;
    game.apply_move(side, Position::new(row, col))
        .map_err(|err| err.to_string())
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Starts a new session. `config` may be `undefined`/`null` for defaults.
#[wasm_bindgen]
pub fn new_game(config: JsValue) -> Result<JsValue, JsValue> {
    let config: GameConfig = if config.is_undefined() || config.is_null() {
        GameConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    let mut game = session()?;
    *game = Game::with_config(&config);
    to_js(&game.to_snapshot())
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    to_js(&session()?.to_snapshot())
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    to_js(&session()?.to_snapshot().legal_moves)
}

/// Plays the side to move at `(row, col)`.
#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let mut game = session()?;
    play(&mut game, row, col).map_err(|msg| JsValue::from_str(&msg))?;
    to_js(&game.to_snapshot())
}

/// Final result, or `null` while the game is still running.
#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    match session()?.to_game_result() {
        Some(result) => to_js(&result),
        None => Ok(JsValue::NULL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_moves_the_side_to_move() {
        let mut game = Game::new();

        play(&mut game, 2, 3).unwrap();

        assert_eq!(game.side_to_move(), Some(Side::White));
        assert_eq!(
            play(&mut game, 0, 0),
            Err("illegal move for white: (0, 0)".to_string())
        );
    }

    #[test]
    fn play_after_game_over_reports_game_over() {
        let text = "XXXXXXXX\n".repeat(4) + &"OOOOOOOO\n".repeat(4);
        let board: Board = text.parse().unwrap();
        let mut game = Game::from_board(board, Side::White);

        assert_eq!(play(&mut game, 0, 0), Err(GAME_OVER.to_string()));
        assert!(game.is_game_over());
    }
}
