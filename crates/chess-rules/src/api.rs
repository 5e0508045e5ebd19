//! Stateless string operations.
//!
//! Every function takes FEN text and re-derives the position on each call.
//! Nothing here panics or returns an error: invalid input collapses into a
//! sentinel result (empty string, empty list, `false` or
//! [`GameState::Invalid`]) and the cause is logged at debug level.

use crate::labels::LabelTable;
use crate::movegen::{self, SquareList};
use crate::rules::{self, GameState};
use crate::Position;
use chess_core::{Move, Square};

/// Parses FEN text into a position.
pub fn parse_position(fen: &str) -> Option<Position> {
    match Position::from_fen(fen) {
        Ok(position) => Some(position),
        Err(err) => {
            tracing::debug!(%fen, %err, "rejected FEN");
            None
        }
    }
}

fn parse_move(text: &str) -> Option<Move> {
    let parsed = Move::from_uci(text);
    if parsed.is_none() {
        tracing::debug!(%text, "rejected move text");
    }
    parsed
}

fn parse_square(text: &str) -> Option<Square> {
    let parsed = Square::from_algebraic(text);
    if parsed.is_none() {
        tracing::debug!(%text, "rejected square name");
    }
    parsed
}

/// Plays a move and returns the resulting FEN.
///
/// Returns an empty string when the FEN or the move text is invalid, or the
/// move is not legal.
pub fn next_position(fen: &str, mv: &str) -> String {
    let Some((position, m)) = parse_position(fen).zip(parse_move(mv)) else {
        return String::new();
    };
    if !movegen::is_legal(&position, m) {
        tracing::debug!(%fen, %m, "rejected illegal move");
        return String::new();
    }
    match movegen::make_move(&position, m) {
        Ok(next) => next.to_fen(),
        Err(err) => {
            tracing::debug!(%fen, %m, %err, "move could not be applied");
            String::new()
        }
    }
}

/// Returns the legal destination squares of the piece on `square`.
pub fn legal_destinations(fen: &str, square: &str) -> Vec<String> {
    let Some((position, from)) = parse_position(fen).zip(parse_square(square)) else {
        return Vec::new();
    };
    to_names(&movegen::legal_destinations(&position, from))
}

fn to_names(squares: &SquareList) -> Vec<String> {
    squares.as_slice().iter().map(|sq| sq.to_algebraic()).collect()
}

/// Returns true if the move text names a legal move.
pub fn is_legal_move(fen: &str, mv: &str) -> bool {
    parse_position(fen)
        .zip(parse_move(mv))
        .is_some_and(|(position, m)| movegen::is_legal(&position, m))
}

/// Returns true if the side to move is in check; false on invalid input.
pub fn is_check(fen: &str) -> bool {
    parse_position(fen).is_some_and(|position| rules::is_check(&position))
}

/// Resolves the status of the position.
pub fn game_state(fen: &str) -> GameState {
    parse_position(fen).map_or(GameState::Invalid, |position| rules::game_state(&position))
}

/// Returns all legal moves in UCI notation.
pub fn legal_moves(fen: &str) -> Vec<String> {
    parse_position(fen).map_or_else(Vec::new, |position| {
        movegen::generate_moves(&position)
            .as_slice()
            .iter()
            .map(|m| m.to_uci())
            .collect()
    })
}

/// Returns the 64 cell labels of the board, a8 to h1.
pub fn board_labels(fen: &str, table: &LabelTable) -> Vec<String> {
    parse_position(fen).map_or_else(Vec::new, |position| {
        table.board(&position).into_iter().map(str::to_string).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, FenParser};

    #[test]
    fn parse_position_rejects_garbage() {
        assert!(parse_position(FenParser::STARTPOS).is_some());
        assert!(parse_position("").is_none());
        assert!(parse_position("not a fen").is_none());
        assert!(parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0").is_none());
    }

    #[test]
    fn next_position_sentinels() {
        assert_eq!(
            next_position(FenParser::STARTPOS, "e2e4"),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(next_position(FenParser::STARTPOS, "e2e5"), "");
        assert_eq!(next_position(FenParser::STARTPOS, "e2"), "");
        assert_eq!(next_position(FenParser::STARTPOS, "e7e5"), "");
        assert_eq!(next_position("bad", "e2e4"), "");
    }

    #[test]
    fn next_position_refuses_king_capture() {
        assert_eq!(next_position("4k3/8/8/8/8/8/8/4RK2 w - - 0 1", "e1e8"), "");
    }

    #[test]
    fn destinations() {
        let mut targets = legal_destinations(FenParser::STARTPOS, "b1");
        targets.sort();
        assert_eq!(targets, ["a3", "c3"]);
        assert!(legal_destinations(FenParser::STARTPOS, "e4").is_empty());
        assert!(legal_destinations(FenParser::STARTPOS, "i9").is_empty());
        assert!(legal_destinations("bad", "e2").is_empty());
    }

    #[test]
    fn legality() {
        assert!(is_legal_move(FenParser::STARTPOS, "e2e4"));
        assert!(!is_legal_move(FenParser::STARTPOS, "e2e5"));
        assert!(!is_legal_move(FenParser::STARTPOS, "zz"));
        assert!(!is_legal_move("bad", "e2e4"));
    }

    #[test]
    fn states() {
        assert_eq!(
            game_state(FenParser::STARTPOS),
            GameState::ToMove(Color::White)
        );
        assert_eq!(game_state("bad"), GameState::Invalid);
        assert_eq!(game_state("bad").to_string(), "Invalid FEN");
        assert_eq!(
            game_state("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").to_string(),
            "Stalemate: Draw"
        );
    }

    #[test]
    fn check() {
        assert!(is_check("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"));
        assert!(!is_check(FenParser::STARTPOS));
        assert!(!is_check("bad"));
    }

    #[test]
    fn moves() {
        assert_eq!(legal_moves(FenParser::STARTPOS).len(), 20);
        assert!(legal_moves("bad").is_empty());
        // Composed boards can exceed the move count of any real game.
        let crowded = "kQQQQQQB/Q6Q/2Q4Q/QK5Q/Q6Q/Q2Q3Q/1Q5Q/2QQQQQB w - - 0 1";
        assert!(legal_moves(crowded).len() > 256);
    }

    #[test]
    fn labels() {
        let table = LabelTable::default();
        let labels = board_labels(FenParser::STARTPOS, &table);
        assert_eq!(labels.len(), 64);
        assert_eq!(labels[63], "piece white-rook");
        assert!(board_labels("bad", &table).is_empty());
    }
}
