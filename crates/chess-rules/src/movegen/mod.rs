//! Move generation.
//!
//! Destinations are generated per source square on the mailbox board: fixed
//! offsets for knights, kings and pawns, ray casting for sliders. Legality is
//! decided by playing the move on a copy of the position and asking the
//! attack oracle about the mover's king.

mod attacks;

pub use attacks::{
    is_king_attacked, is_square_attacked, ray, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS,
    ORTHOGONALS,
};

use crate::position::{CastleSide, CastlingRights};
use crate::Position;
use chess_core::{Color, Move, Piece, Square};
use thiserror::Error;

/// A list of squares with a fixed maximum capacity.
///
/// A queen in the middle of an empty board reaches 27 squares, the most any
/// single piece can.
#[derive(Clone, Copy)]
pub struct SquareList {
    squares: [Square; Self::MAX_SQUARES],
    len: usize,
}

impl SquareList {
    /// Capacity of the list.
    pub const MAX_SQUARES: usize = 32;

    /// Creates an empty square list.
    #[inline]
    pub const fn new() -> Self {
        SquareList {
            squares: [Square::A8; Self::MAX_SQUARES],
            len: 0,
        }
    }

    /// Adds a square to the list.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!(self.len < Self::MAX_SQUARES);
        self.squares[self.len] = sq;
        self.len += 1;
    }

    /// Returns the number of squares.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the squares.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    /// Returns true if `sq` is in the list.
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    /// Keeps only the squares for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for SquareList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for SquareList {
    type Output = Square;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.squares[index]
    }
}

impl<'a> IntoIterator for &'a SquareList {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for SquareList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A growable list of moves.
///
/// Positions built from FEN need not be reachable in a game, so the number
/// of legal moves has no small upper bound.
#[derive(Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Errors from applying a move to a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("no piece on {0}")]
    EmptySource(Square),

    #[error("piece on {square} belongs to {owner}, but {to_move} is to move")]
    NotSideToMove {
        square: Square,
        owner: Color,
        to_move: Color,
    },

    #[error("promotion in {0} is not a pawn reaching the last rank")]
    MisplacedPromotion(Move),

    #[error("move {0} would capture a king")]
    KingCapture(Move),

    #[error("{0} would overflow")]
    CounterOverflow(&'static str),
}

/// Returns the pseudo-legal destinations of the piece on `from`.
///
/// Empty when `from` is empty or holds a piece of the side not to move.
/// King safety is not considered, except for the attacked-square
/// conditions of castling.
pub fn candidate_destinations(position: &Position, from: Square) -> SquareList {
    let mut targets = SquareList::new();
    let Some((piece, color)) = position.piece_at(from) else {
        return targets;
    };
    if color != position.side_to_move {
        return targets;
    }

    match piece {
        Piece::Pawn => pawn_destinations(position, from, color, &mut targets),
        Piece::Knight => step_destinations(position, from, color, &KNIGHT_OFFSETS, &mut targets),
        Piece::Bishop => slider_destinations(position, from, color, &DIAGONALS, &mut targets),
        Piece::Rook => slider_destinations(position, from, color, &ORTHOGONALS, &mut targets),
        Piece::Queen => {
            slider_destinations(position, from, color, &DIAGONALS, &mut targets);
            slider_destinations(position, from, color, &ORTHOGONALS, &mut targets);
        }
        Piece::King => {
            step_destinations(position, from, color, &KING_OFFSETS, &mut targets);
            castling_destinations(position, from, color, &mut targets);
        }
    }

    targets
}

fn pawn_destinations(position: &Position, from: Square, us: Color, targets: &mut SquareList) {
    let step = us.pawn_row_step();

    if let Some(one) = from.offset(0, step).filter(|&sq| position.is_empty(sq)) {
        targets.push(one);
        if from.row() == us.pawn_start_row() {
            if let Some(two) = one.offset(0, step).filter(|&sq| position.is_empty(sq)) {
                targets.push(two);
            }
        }
    }

    for d_file in [-1, 1] {
        if let Some(to) = from.offset(d_file, step) {
            let enemy = position.color_at(to) == Some(us.opposite());
            if enemy || position.en_passant == Some(to) {
                targets.push(to);
            }
        }
    }
}

fn step_destinations(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    targets: &mut SquareList,
) {
    for &(d_file, d_row) in offsets {
        if let Some(to) = from.offset(d_file, d_row) {
            if position.color_at(to) != Some(us) {
                targets.push(to);
            }
        }
    }
}

fn slider_destinations(
    position: &Position,
    from: Square,
    us: Color,
    dirs: &[(i8, i8)],
    targets: &mut SquareList,
) {
    for &dir in dirs {
        for to in ray(from, dir) {
            match position.color_at(to) {
                None => targets.push(to),
                Some(color) => {
                    if color != us {
                        targets.push(to);
                    }
                    break;
                }
            }
        }
    }
}

/// Castling is measured from the king's current square: the squares between
/// it and the rook side must be empty, and the king's square, the square it
/// passes and its destination must not be attacked.
fn castling_destinations(position: &Position, from: Square, us: Color, targets: &mut SquareList) {
    let them = us.opposite();

    for side in CastleSide::ALL {
        if !position.castling.allows(us, side) {
            continue;
        }
        let dir = side.direction();

        let mut between = (1..=side.gap()).map(|n| from.offset(dir * n, 0));
        let path_empty = between.all(|sq| sq.is_some_and(|sq| position.is_empty(sq)));

        let mut path = (0..=2).map(|n| from.offset(dir * n, 0));
        let path_safe = path.all(|sq| sq.is_some_and(|sq| !is_square_attacked(position, sq, them)));

        if path_empty && path_safe {
            if let Some(to) = from.offset(2 * dir, 0) {
                targets.push(to);
            }
        }
    }
}

/// Returns the castling side if `mv` by `piece` is a two-file king move.
fn castle_side(mv: Move, piece: Piece) -> Option<CastleSide> {
    if piece != Piece::King || mv.from().row() != mv.to().row() {
        return None;
    }
    match mv.to().file_index() as i8 - mv.from().file_index() as i8 {
        2 => Some(CastleSide::King),
        -2 => Some(CastleSide::Queen),
        _ => None,
    }
}

/// Returns the square of the pawn removed by `mv` if it captures en passant.
fn en_passant_victim(position: &Position, mv: Move, piece: Piece) -> Option<Square> {
    let (from, to) = (mv.from(), mv.to());
    if piece != Piece::Pawn || from.file_index() == to.file_index() {
        return None;
    }
    if position.en_passant != Some(to) {
        return None;
    }
    Square::from_coords(to.file_index() as i8, from.row() as i8)
}

/// Plays the board part of `mv`: the castling rook, the en passant capture,
/// the moving piece and its promotion. Returns true if anything was captured.
fn play_on_board(position: &mut Position, mv: Move, piece: Piece, us: Color) -> bool {
    let (from, to) = (mv.from(), mv.to());

    if let Some(side) = castle_side(mv, piece) {
        let corner = Square::from_coords(side.rook_file() as i8, from.row() as i8);
        let passed = from.offset(side.direction(), 0);
        if let (Some(corner), Some(passed)) = (corner, passed) {
            if position.piece_at(corner) == Some((Piece::Rook, us)) && position.is_empty(passed) {
                position.relocate(corner, passed);
            }
        }
    }

    let mut captured = false;
    if let Some(victim) = en_passant_victim(position, mv, piece) {
        captured |= position.clear(victim).is_some();
    }

    captured |= position.relocate(from, to).is_some();
    if let Some(promotion) = mv.promotion() {
        position.put(to, promotion, us);
    }

    captured
}

/// Returns true if the mover's king is safe after playing `mv` on a copy.
fn leaves_king_safe(position: &Position, mv: Move, piece: Piece, us: Color) -> bool {
    let mut probe = position.clone();
    play_on_board(&mut probe, mv, piece, us);
    !is_king_attacked(&probe, us)
}

fn promotion_fits(mv: Move, piece: Piece, us: Color) -> bool {
    mv.promotion().is_none() || (piece == Piece::Pawn && mv.to().row() == us.promotion_row())
}

/// Returns the legal destinations of the piece on `from`.
pub fn legal_destinations(position: &Position, from: Square) -> SquareList {
    let mut targets = candidate_destinations(position, from);
    if let Some((piece, us)) = position.piece_at(from) {
        targets.retain(|to| leaves_king_safe(position, Move::new(from, to), piece, us));
    }
    targets
}

/// Returns true if `mv` is legal in the position.
///
/// A missing promotion letter on a pawn reaching the last rank is accepted;
/// the pawn then stays a pawn.
pub fn is_legal(position: &Position, mv: Move) -> bool {
    let Some((piece, us)) = position.piece_at(mv.from()) else {
        return false;
    };
    us == position.side_to_move
        && promotion_fits(mv, piece, us)
        && candidate_destinations(position, mv.from()).contains(mv.to())
        && leaves_king_safe(position, mv, piece, us)
}

/// Generates all legal moves for the given position.
///
/// One move per destination; promotions are not expanded.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    for from in position.squares_of(position.side_to_move) {
        for &to in &legal_destinations(position, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    position
        .squares_of(position.side_to_move)
        .any(|from| !legal_destinations(position, from).is_empty())
}

fn update_castling_rights(
    rights: &mut CastlingRights,
    mv: Move,
    piece: Piece,
    captured: Option<(Piece, Color)>,
    us: Color,
) {
    if piece == Piece::King {
        rights.remove_color(us);
    }
    if piece == Piece::Rook {
        if let Some(side) = CastleSide::of_rook_corner(mv.from(), us) {
            rights.remove(us, side);
        }
    }
    let them = us.opposite();
    if captured == Some((Piece::Rook, them)) {
        if let Some(side) = CastleSide::of_rook_corner(mv.to(), them) {
            rights.remove(them, side);
        }
    }
}

/// Makes a move and returns the new position.
///
/// Legality is not checked; see [`is_legal`]. The move is refused when its
/// source holds no piece of the side to move, when a promotion is attached
/// to anything but a pawn reaching the last rank, when it would remove a
/// king, or when a move counter would overflow.
pub fn make_move(position: &Position, mv: Move) -> Result<Position, RulesError> {
    let us = position.side_to_move;
    let them = us.opposite();
    let (from, to) = (mv.from(), mv.to());

    let (piece, owner) = position
        .piece_at(from)
        .ok_or(RulesError::EmptySource(from))?;
    if owner != us {
        return Err(RulesError::NotSideToMove {
            square: from,
            owner,
            to_move: us,
        });
    }
    if !promotion_fits(mv, piece, us) {
        return Err(RulesError::MisplacedPromotion(mv));
    }

    let is_king = |sq: Square| matches!(position.piece_at(sq), Some((Piece::King, _)));
    if is_king(to) || en_passant_victim(position, mv, piece).is_some_and(is_king) {
        return Err(RulesError::KingCapture(mv));
    }

    let mut new_pos = position.clone();
    let captured = play_on_board(&mut new_pos, mv, piece, us);

    update_castling_rights(&mut new_pos.castling, mv, piece, position.piece_at(to), us);

    let double_push = piece == Piece::Pawn
        && from.file_index() == to.file_index()
        && from.row().abs_diff(to.row()) == 2;
    new_pos.en_passant = if double_push {
        from.offset(0, us.pawn_row_step())
    } else {
        None
    };

    new_pos.halfmove_clock = if piece == Piece::Pawn || captured {
        0
    } else {
        position
            .halfmove_clock
            .checked_add(1)
            .ok_or(RulesError::CounterOverflow("halfmove clock"))?
    };

    if us == Color::Black {
        new_pos.fullmove_number = position
            .fullmove_number
            .checked_add(1)
            .ok_or(RulesError::CounterOverflow("fullmove number"))?;
    }

    new_pos.side_to_move = them;

    Ok(new_pos)
}

/// Makes a move only if it is legal.
pub fn try_make_move(position: &Position, mv: Move) -> Option<Position> {
    if is_legal(position, mv) {
        make_move(position, mv).ok()
    } else {
        None
    }
}
