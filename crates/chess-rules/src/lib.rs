//! Stateless chess rules over FEN positions.
//!
//! This crate provides:
//! - [`Position`] - board contents plus turn, castling rights, en passant
//!   square and move counters
//! - Move generation and validation on a 64-cell mailbox board
//! - [`GameState`] resolution (to move, checkmate, stalemate)
//! - [`RuleSet`] - the rule operations behind one trait
//! - [`api`] - string-in, string-out operations that never fail
//! - [`LabelTable`] - display labels for board cells
//!
//! # Example
//!
//! ```
//! use chess_rules::{api, Position, StandardChess};
//! use chess_rules::rules::RuleSet;
//!
//! // Typed operations
//! let position = StandardChess.initial_position();
//! let moves = StandardChess.generate_moves(&position);
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! // String operations
//! let fen = api::next_position(chess_core::FenParser::STARTPOS, "e2e4");
//! assert_eq!(api::game_state(&fen).to_string(), "Black to move");
//! ```

pub mod api;
mod labels;
pub mod movegen;
mod position;
pub mod rules;

pub use labels::{LabelTable, UnknownLabelKey};
pub use movegen::{
    candidate_destinations, generate_moves, has_legal_move, is_king_attacked, is_legal,
    is_square_attacked, legal_destinations, make_move, try_make_move, MoveList, RulesError,
    SquareList,
};
pub use position::{CastleSide, CastlingRights, Position};
pub use rules::{game_state, is_check, GameState, RuleSet, StandardChess};
