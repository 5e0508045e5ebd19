//! Integration tests for chess-rules: scripted games and random legal walks.

use chess_core::{Color, FenParser, Move, Piece, Square};
use chess_rules::rules::RuleSet;
use chess_rules::{api, GameState, Position, StandardChess};
use proptest::prelude::*;
use proptest::sample::Index;

fn play_line(fen: &str, line: &[&str]) -> String {
    line.iter().fold(fen.to_string(), |fen, mv| {
        let next = api::next_position(&fen, mv);
        assert!(!next.is_empty(), "{mv} rejected in {fen}");
        next
    })
}

#[test]
fn italian_opening_and_castle() {
    let fen = play_line(
        FenParser::STARTPOS,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1"],
    );
    assert_eq!(
        fen,
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
    );
}

#[test]
fn en_passant_window_closes() {
    let fen = play_line(FenParser::STARTPOS, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(
        fen,
        "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
    );
    assert!(api::is_legal_move(&fen, "e5d6"));

    // One quiet move each and the capture is gone.
    let later = play_line(&fen, &["g1f3", "g8f6"]);
    assert!(!api::is_legal_move(&later, "e5d6"));
}

#[test]
fn mirrored_queen_mates() {
    assert_eq!(
        api::game_state("8/8/8/8/8/6K1/4Q3/6k1 w - - 21 61").to_string(),
        "White to move"
    );
    let white = api::next_position("8/8/8/8/8/6K1/4Q3/6k1 w - - 21 61", "e2e1");
    assert_eq!(api::game_state(&white).to_string(), "Checkmate: White wins");

    let black = api::next_position("6K1/4q3/6k1/8/8/8/8/8 b - - 0 1", "e7e8");
    assert_eq!(api::game_state(&black).to_string(), "Checkmate: Black wins");
}

#[test]
fn destinations_agree_with_legality_on_fixed_positions() {
    for fen in [
        FenParser::STARTPOS,
        "rn1qkbnr/p1p1pppp/8/1pPp4/3P1B2/8/PP2PPPP/Rb1QKBNR w KQkq b6 0 5",
        "r3k2r/p4p1p/4np2/1Bb5/3p4/P3nN2/1P3PPP/R3K2R w Qk - 2 18",
        "8/8/8/KPp4r/8/8/8/7k w - c6 0 1",
    ] {
        assert_destinations_agree(fen);
    }
}

fn assert_destinations_agree(fen: &str) {
    for from in Square::all() {
        let from_name = from.to_algebraic();
        let targets = api::legal_destinations(fen, &from_name);
        for to in Square::all() {
            let to_name = to.to_algebraic();
            let text = format!("{from_name}{to_name}");
            assert_eq!(
                api::is_legal_move(fen, &text),
                targets.contains(&to_name),
                "{text} in {fen}"
            );
        }
    }
}

proptest! {
    /// Every position reached by legal moves survives a FEN round trip and
    /// keeps exactly one king per side on the recorded squares.
    #[test]
    fn prop_walk_fen_roundtrip(picks in prop::collection::vec(any::<Index>(), 1..40)) {
        let mut position = Position::startpos();
        for pick in picks {
            let moves = StandardChess.generate_moves(&position);
            if moves.is_empty() {
                break;
            }
            let m = moves[pick.index(moves.len())];
            let before = position.clone();
            let next = StandardChess.try_make_move(&position, m);
            prop_assert!(next.is_some(), "{} refused", m);
            prop_assert_eq!(&position, &before);
            position = next.unwrap();

            let fen = position.to_fen();
            prop_assert_eq!(Position::from_fen(&fen).unwrap(), position.clone());
            for color in Color::ALL {
                let king = position.king_square(color);
                prop_assert_eq!(position.piece_at(king), Some((Piece::King, color)));
            }
        }
    }

    /// Destination lists and single-move legality agree along random walks,
    /// and the mover never ends up in check.
    #[test]
    fn prop_walk_destinations_agree(picks in prop::collection::vec(any::<Index>(), 1..25)) {
        let mut position = Position::startpos();
        for pick in picks {
            let moves = StandardChess.generate_moves(&position);
            if moves.is_empty() {
                prop_assert!(StandardChess.is_game_over(&position));
                break;
            }
            for &m in &moves {
                prop_assert!(StandardChess.is_legal(&position, m));
                let targets = StandardChess.legal_destinations(&position, m.from());
                prop_assert!(targets.contains(m.to()));
            }
            let from = moves[pick.index(moves.len())].from();
            for to in Square::all() {
                let legal = StandardChess.is_legal(&position, Move::new(from, to));
                let listed = StandardChess.legal_destinations(&position, from).contains(to);
                prop_assert_eq!(legal, listed);
            }

            let m = moves[pick.index(moves.len())];
            let mover = position.side_to_move;
            position = StandardChess.make_move(&position, m).unwrap();
            prop_assert!(!chess_rules::is_king_attacked(&position, mover));
            let state_ok = matches!(
                StandardChess.game_state(&position),
                GameState::ToMove(_) | GameState::Checkmate { .. } | GameState::Stalemate
            );
            prop_assert!(state_ok);
        }
    }
}
