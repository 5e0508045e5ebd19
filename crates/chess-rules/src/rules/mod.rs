//! Rule set abstraction and game state resolution.
//!
//! This module provides the [`RuleSet`] trait, which gathers the rule
//! operations behind one seam, and [`GameState`], the status of a position
//! as reported to callers.

mod standard;

pub use standard::StandardChess;

use crate::movegen::{self, MoveList, RulesError, SquareList};
use crate::Position;
use chess_core::{Color, Move, Square};
use std::fmt;

/// Status of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// The game goes on and the given color is to move.
    ToMove(Color),
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// The input did not describe a position.
    Invalid,
}

impl GameState {
    /// Returns true if no further move can be played.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameState::Checkmate { .. } | GameState::Stalemate)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::ToMove(color) => write!(f, "{color} to move"),
            GameState::Checkmate { winner } => write!(f, "Checkmate: {winner} wins"),
            GameState::Stalemate => write!(f, "Stalemate: Draw"),
            GameState::Invalid => write!(f, "Invalid FEN"),
        }
    }
}

/// Returns true if the side to move is in check.
pub fn is_check(position: &Position) -> bool {
    movegen::is_king_attacked(position, position.side_to_move)
}

/// Resolves the status of a position.
pub fn game_state(position: &Position) -> GameState {
    let us = position.side_to_move;
    let state = if movegen::has_legal_move(position) {
        GameState::ToMove(us)
    } else if is_check(position) {
        GameState::Checkmate {
            winner: us.opposite(),
        }
    } else {
        GameState::Stalemate
    };
    tracing::trace!(%state, "resolved game state");
    state
}

/// Trait for the rules a position is played under.
///
/// # Example
///
/// ```
/// use chess_rules::rules::RuleSet;
/// use chess_rules::StandardChess;
///
/// let position = StandardChess.initial_position();
/// let moves = StandardChess.generate_moves(&position);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the initial position.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves, one per destination.
    fn generate_moves(&self, position: &Position) -> MoveList;

    /// Returns the legal destinations of the piece on `from`.
    fn legal_destinations(&self, position: &Position, from: Square) -> SquareList;

    /// Returns true if the given move is legal in the position.
    fn is_legal(&self, position: &Position, m: Move) -> bool;

    /// Makes a move on the position, returning the new position.
    ///
    /// Does not check legality. Use [`try_make_move`](RuleSet::try_make_move)
    /// for untrusted input.
    fn make_move(&self, position: &Position, m: Move) -> Result<Position, RulesError>;

    /// Attempts to make a move, returning `None` if illegal.
    fn try_make_move(&self, position: &Position, m: Move) -> Option<Position> {
        if self.is_legal(position, m) {
            self.make_move(position, m).ok()
        } else {
            None
        }
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Returns the status of the position.
    fn game_state(&self, position: &Position) -> GameState;

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &Position) -> bool {
        self.game_state(position).is_over()
    }
}
