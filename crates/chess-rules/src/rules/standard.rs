//! Standard chess rules implementation.

use super::{GameState, RuleSet};
use crate::movegen::{self, MoveList, RulesError, SquareList};
use crate::Position;
use chess_core::{Move, Square};

/// Standard chess rules.
///
/// Covers piece movement, castling, en passant, promotion, and check,
/// checkmate and stalemate detection. Draw rules that need history or
/// counting (repetition, fifty moves, insufficient material) are not
/// applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn generate_moves(&self, position: &Position) -> MoveList {
        movegen::generate_moves(position)
    }

    fn legal_destinations(&self, position: &Position, from: Square) -> SquareList {
        movegen::legal_destinations(position, from)
    }

    fn is_legal(&self, position: &Position, m: Move) -> bool {
        movegen::is_legal(position, m)
    }

    fn make_move(&self, position: &Position, m: Move) -> Result<Position, RulesError> {
        movegen::make_move(position, m)
    }

    fn is_check(&self, position: &Position) -> bool {
        super::is_check(position)
    }

    fn game_state(&self, position: &Position) -> GameState {
        super::game_state(position)
    }
}
