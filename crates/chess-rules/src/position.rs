//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Piece, Square};

/// The two castling sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Towards the h-file rook (O-O).
    King,
    /// Towards the a-file rook (O-O-O).
    Queen,
}

impl CastleSide {
    /// Both sides, kingside first.
    pub const ALL: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// File step the king takes towards the rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::King => 1,
            CastleSide::Queen => -1,
        }
    }

    /// File of the rook's corner on this side.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    /// Number of squares beside the king that must be empty to castle.
    #[inline]
    pub const fn gap(self) -> i8 {
        match self {
            CastleSide::King => 2,
            CastleSide::Queen => 3,
        }
    }

    /// Returns the side whose rook starts on `sq` for `color`, if any.
    pub fn of_rook_corner(sq: Square, color: Color) -> Option<Self> {
        if sq.row() != color.back_row() {
            return None;
        }
        Self::ALL.into_iter().find(|side| side.rook_file() == sq.file_index())
    }
}

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::King) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queen) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::King) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queen) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Reads a validated FEN castling field (`-` or a subset of `KQkq`).
    pub fn from_fen_field(field: &str) -> Self {
        let flags = field.chars().fold(0u8, |acc, c| {
            acc | match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => 0,
            }
        });
        CastlingRights(flags)
    }

    /// Writes the FEN castling field, always in `KQkq` order.
    pub fn to_fen_field(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .into_iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|(_, c)| c)
        .collect()
    }

    /// Returns true if `color` keeps the right to castle on `side`.
    #[inline]
    pub const fn allows(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Removes one castling right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::King);
        self.remove(color, CastleSide::Queen);
    }
}

/// Complete chess position state.
///
/// A value type: every operation that changes the position works on a copy.
/// The board is private so the recorded king squares stay in step with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<(Piece, Color)>; 64],

    /// Square of each king, indexed by [`Color::index`].
    kings: [Square; 2],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights, as claimed by the FEN record.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// Castling rights and the en passant square are taken as given; they are
    /// not checked against the piece placement.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        Ok(Position {
            board: parsed.squares,
            kings: parsed.kings,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen_field(&parsed.castling),
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        })
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        FenParser {
            squares: self.board,
            kings: self.kings,
            active_color: self.side_to_move,
            castling: self.castling.to_fen_field(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board[sq.index() as usize]
    }

    /// Returns true if nothing stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, color)| color)
    }

    /// Returns the square of the given color's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Iterates over the squares holding pieces of `color`, a8 first.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.color_at(sq) == Some(color))
    }

    /// Moves whatever stands on `from` to `to`, returning what `to` held.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<(Piece, Color)> {
        let moving = self.board[from.index() as usize].take();
        let captured = std::mem::replace(&mut self.board[to.index() as usize], moving);
        if let Some((Piece::King, color)) = moving {
            self.kings[color.index()] = to;
        }
        captured
    }

    /// Puts a non-king piece on `sq`.
    pub(crate) fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        debug_assert_ne!(piece, Piece::King);
        self.board[sq.index() as usize] = Some((piece, color));
    }

    /// Empties `sq`, returning what stood there.
    pub(crate) fn clear(&mut self, sq: Square) -> Option<(Piece, Color)> {
        self.board[sq.index() as usize].take()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
