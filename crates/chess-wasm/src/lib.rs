//! WebAssembly bindings for the chess rules.
//!
//! Every function is stateless: the caller passes the FEN string each time
//! and gets plain strings back. Lists are joined with NUL characters, and
//! invalid input yields an empty string, `false` or `"Invalid FEN"`.
//!
//! # Usage
//!
//! ```javascript
//! import init, { getGameState, getValidTargetSquares, getNextFEN } from 'chess-wasm';
//!
//! await init();
//!
//! const start = 'rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1';
//! console.log(getGameState(start));                        // "White to move"
//! console.log(getValidTargetSquares(start, 'e2').split('\0')); // ["e3", "e4"]
//! const next = getNextFEN(start, 'e2e4');
//! ```

use chess_rules::{api, rules, LabelTable};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Separator between list entries in returned strings.
const SEPARATOR: &str = "\0";

/// Returns the game state label, e.g. "White to move" or "Invalid FEN".
#[wasm_bindgen(js_name = getGameState)]
pub fn get_game_state(fen: &str) -> String {
    api::game_state(fen).to_string()
}

/// Returns true if the UCI move (e.g. "e2e4", "e7e8q") is legal.
#[wasm_bindgen(js_name = isValidMove)]
pub fn is_valid_move(fen: &str, mv: &str) -> bool {
    api::is_legal_move(fen, mv)
}

/// Returns the legal destinations of the piece on `square`, NUL-separated.
#[wasm_bindgen(js_name = getValidTargetSquares)]
pub fn get_valid_target_squares(fen: &str, square: &str) -> String {
    api::legal_destinations(fen, square).join(SEPARATOR)
}

/// Returns the FEN after playing `mv`, or an empty string if it can't be played.
#[wasm_bindgen(js_name = getNextFEN)]
pub fn get_next_fen(fen: &str, mv: &str) -> String {
    api::next_position(fen, mv)
}

/// Returns the 64 HTML class names of the board, a8 to h1, NUL-separated.
#[wasm_bindgen(js_name = fenToHtmlClassNames)]
pub fn fen_to_html_class_names(fen: &str) -> String {
    api::board_labels(fen, &LabelTable::default()).join(SEPARATOR)
}

/// Returns true if the side to move is in check.
#[wasm_bindgen(js_name = isCheck)]
pub fn is_check(fen: &str) -> bool {
    api::is_check(fen)
}

/// Fields of a parsed position, as handed to JavaScript.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct PositionSummary {
    fen: String,
    side_to_move: &'static str,
    castling: String,
    en_passant: Option<String>,
    halfmove_clock: u32,
    fullmove_number: u32,
    check: bool,
    state: String,
}

fn summarize(fen: &str) -> Option<PositionSummary> {
    let position = api::parse_position(fen)?;
    Some(PositionSummary {
        fen: position.to_fen(),
        side_to_move: match position.side_to_move {
            chess_core::Color::White => "white",
            chess_core::Color::Black => "black",
        },
        castling: position.castling.to_fen_field(),
        en_passant: position.en_passant.map(|sq| sq.to_algebraic()),
        halfmove_clock: position.halfmove_clock,
        fullmove_number: position.fullmove_number,
        check: rules::is_check(&position),
        state: rules::game_state(&position).to_string(),
    })
}

/// Returns the parsed fields of the position as an object, or null if the
/// FEN is invalid.
#[wasm_bindgen(js_name = describePosition)]
pub fn describe_position(fen: &str) -> Result<JsValue, JsError> {
    match summarize(fen) {
        Some(summary) => {
            serde_wasm_bindgen::to_value(&summary).map_err(|e| JsError::new(&e.to_string()))
        }
        None => Ok(JsValue::NULL),
    }
}
