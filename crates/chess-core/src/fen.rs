//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! The grammar is strict so that every accepted record serializes back to
//! exactly the same text: single spaces between the six fields, no adjacent
//! digits inside a rank, castling letters in `KQkq` order, and counters
//! without signs or leading zeros.

use crate::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 space-separated parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid piece placement: expected exactly one {color} king, found {count}")]
    InvalidKingCount { color: Color, count: usize },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
///
/// Holds the expanded board and the metadata fields. Castling rights stay in
/// their textual form; the rules crate turns them into flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Board contents indexed by [`Square::index`] (a8 first).
    pub squares: [Option<(Piece, Color)>; 64],
    /// Square of each king, indexed by [`Color::index`].
    pub kings: [Square; 2],
    /// Side to move.
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-").
    pub castling: String,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split(' ').collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let (squares, kings) = Self::parse_piece_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = match parts[3] {
            "-" => None,
            ep => Some(
                Square::from_algebraic(ep)
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(ep.to_string()))?,
            ),
        };

        let halfmove_clock = parse_counter(parts[4])
            .ok_or_else(|| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parse_counter(parts[5])
            .filter(|&n| n > 0)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            squares,
            kings,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Expands the ranks into a board, locating both kings on the way.
    #[allow(clippy::type_complexity)]
    fn parse_piece_placement(
        placement: &str,
    ) -> Result<([Option<(Piece, Color)>; 64], [Square; 2]), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut squares = [None; 64];
        let mut kings: [Vec<Square>; 2] = [Vec::new(), Vec::new()];

        for (row, rank) in ranks.iter().enumerate() {
            let rank_number = 8 - row;
            let mut file = 0usize;
            let mut previous_was_digit = false;

            for c in rank.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    if previous_was_digit {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "adjacent digits in rank {}",
                            rank_number
                        )));
                    }
                    previous_was_digit = true;
                    file += run as usize;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    previous_was_digit = false;
                    let square = Square::from_coords(file as i8, row as i8).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!(
                            "rank {} has more than 8 squares",
                            rank_number
                        ))
                    })?;
                    if piece == Piece::King {
                        kings[color.index()].push(square);
                    }
                    squares[square.index() as usize] = Some((piece, color));
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, rank_number
                    )));
                }
                if file > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} has more than 8 squares",
                        rank_number
                    )));
                }
            }

            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank_number, file
                )));
            }
        }

        let mut found = [Square::A8; 2];
        for color in Color::ALL {
            match kings[color.index()].as_slice() {
                [square] => found[color.index()] = *square,
                other => {
                    return Err(FenError::InvalidKingCount {
                        color,
                        count: other.len(),
                    })
                }
            }
        }

        Ok((squares, found))
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }
        if castling.is_empty() {
            return Err(FenError::InvalidCastlingRights("empty field".to_string()));
        }

        const ORDER: &str = "KQkq";
        let mut last: Option<usize> = None;
        for c in castling.chars() {
            let idx = ORDER.find(c).ok_or_else(|| {
                FenError::InvalidCastlingRights(format!("invalid character '{}'", c))
            })?;
            if last.is_some_and(|l| idx <= l) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "'{}' is repeated or out of KQkq order",
                    castling
                )));
            }
            last = Some(idx);
        }

        Ok(())
    }

    /// Returns the piece placement field, run-length encoding empty squares.
    pub fn piece_placement(&self) -> String {
        let mut placement = String::with_capacity(71);
        for (idx, cell) in self.squares.iter().enumerate() {
            if idx > 0 && idx % 8 == 0 {
                placement.push('/');
            }
            match cell {
                Some((piece, color)) => placement.push(piece.to_fen_char(*color)),
                None => match placement.pop() {
                    Some(run @ '1'..='7') => placement.push((run as u8 + 1) as char),
                    Some(other) => {
                        placement.push(other);
                        placement.push('1');
                    }
                    None => placement.push('1'),
                },
            }
        }
        placement
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement(),
            self.active_color.to_fen_char(),
            self.castling,
            self.en_passant
                .map_or_else(|| "-".to_string(), Square::to_algebraic),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

/// Parses an unsigned decimal counter: digits only, no leading zeros.
fn parse_counter(s: &str) -> Option<u32> {
    let canonical = !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'));
    if canonical {
        s.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.kings, [Square::E1, Square::E8]);
        assert_eq!(
            fen.squares[Square::A1.index() as usize],
            Some((Piece::Rook, Color::White))
        );
        assert_eq!(
            fen.squares[Square::H8.index() as usize],
            Some((Piece::Rook, Color::Black))
        );
    }

    #[test]
    fn parse_custom_position() {
        let fen =
            FenParser::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
    }

    #[test]
    fn roundtrip() {
        for original in [
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "8/8/8/8/8/6K1/4Q3/6k1 w - - 21 61",
            "r3k2r/p4p1p/4np2/1Bb5/3p4/P3nN2/1P3PPP/R3K2R w KQkq - 2 18",
            "8/7K/8/8/8/8/q7/7k w KQq - 40 40",
        ] {
            let parsed = FenParser::parse(original).unwrap();
            assert_eq!(parsed.to_fen(), original);
        }
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenParser::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));

        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn spacing_is_strict() {
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3  w - - 0 1"),
            Err(FenError::InvalidPartCount(7))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1 "),
            Err(FenError::InvalidPartCount(7))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - -"),
            Err(FenError::InvalidPartCount(4))
        ));
    }

    #[test]
    fn invalid_piece_placement_rank_count() {
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_invalid_char() {
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/8/8/0/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_wrong_squares() {
        assert!(matches!(
            FenParser::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenParser::parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn adjacent_digits_rejected() {
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn king_count_checked() {
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidKingCount {
                color: Color::White,
                count: 0
            })
        );
        assert_eq!(
            FenParser::parse("k6k/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidKingCount {
                color: Color::Black,
                count: 2
            })
        );
        assert!(FenParser::parse("4p3/8/8/8/8/k6P/6K1/8 b - - 6 42").is_ok());
    }

    #[test]
    fn invalid_castling_rights() {
        for castling in ["XYZ", "KK", "qk", "QK", "KQkqq", "K-"] {
            let fen = format!("4k3/8/8/8/8/8/8/4K3 w {} - 0 1", castling);
            assert!(
                matches!(FenParser::parse(&fen), Err(FenError::InvalidCastlingRights(_))),
                "{castling}"
            );
        }
    }

    #[test]
    fn invalid_en_passant() {
        for ep in ["abc", "x3", "e9", "E3", "e"] {
            let fen = format!("4k3/8/8/8/8/8/8/4K3 w - {} 0 1", ep);
            assert!(
                matches!(FenParser::parse(&fen), Err(FenError::InvalidEnPassantSquare(_))),
                "{ep}"
            );
        }
    }

    #[test]
    fn en_passant_square_is_not_cross_checked() {
        let fen = FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - e4 0 1").unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("e4"));
    }

    #[test]
    fn invalid_halfmove_clock() {
        for clock in ["abc", "-1", "+1", "01", "4294967296"] {
            let fen = format!("4k3/8/8/8/8/8/8/4K3 w - - {} 1", clock);
            assert!(
                matches!(FenParser::parse(&fen), Err(FenError::InvalidHalfmoveClock(_))),
                "{clock}"
            );
        }
    }

    #[test]
    fn invalid_fullmove_number() {
        for number in ["xyz", "0", "007"] {
            let fen = format!("4k3/8/8/8/8/8/8/4K3 w - - 0 {}", number);
            assert!(
                matches!(FenParser::parse(&fen), Err(FenError::InvalidFullmoveNumber(_))),
                "{number}"
            );
        }
    }

    #[test]
    fn fen_parser_default() {
        let fen = FenParser::default();
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn fen_partial_castling() {
        let fen = FenParser::parse("4k3/8/8/8/8/8/8/4K3 w Kq - 0 1").unwrap();
        assert_eq!(fen.castling, "Kq");
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidKingCount {
            color: Color::Black,
            count: 2,
        };
        assert!(format!("{}", err).contains("Black king"));

        let err = FenError::InvalidCastlingRights("XYZ".to_string());
        assert!(format!("{}", err).contains("XYZ"));

        let err = FenError::InvalidFullmoveNumber("xyz".to_string());
        assert!(format!("{}", err).contains("xyz"));
    }
}
