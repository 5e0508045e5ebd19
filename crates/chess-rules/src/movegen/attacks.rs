//! Attack detection by ray casting and fixed offsets over the mailbox board.

use crate::Position;
use chess_core::{Color, Piece, Square};

/// Diagonal directions as (file, row) steps.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Orthogonal directions as (file, row) steps.
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Knight jumps as (file, row) steps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King steps as (file, row) steps.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Iterates over the squares from `from` (exclusive) in direction `dir`
/// until the board edge.
pub fn ray(from: Square, dir: (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(dir.0, dir.1), move |sq| sq.offset(dir.0, dir.1))
}

/// Returns the first occupied square along a ray, if any.
fn first_blocker(position: &Position, from: Square, dir: (i8, i8)) -> Option<Square> {
    ray(from, dir).find(|&sq| !position.is_empty(sq))
}

/// Returns true if a piece of `by_color` matching `pieces` stands on any of
/// the squares reached from `sq` by `offsets`.
fn attacked_by_step(
    position: &Position,
    sq: Square,
    offsets: &[(i8, i8)],
    by_color: Color,
    pieces: &[Piece],
) -> bool {
    offsets
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .filter_map(|target| position.piece_at(target))
        .any(|(piece, color)| color == by_color && pieces.contains(&piece))
}

/// Returns true if a slider of `by_color` matching `pieces` sees `sq` along
/// one of `dirs`.
fn attacked_by_ray(
    position: &Position,
    sq: Square,
    dirs: &[(i8, i8)],
    by_color: Color,
    pieces: &[Piece],
) -> bool {
    dirs.iter()
        .filter_map(|&dir| first_blocker(position, sq, dir))
        .filter_map(|blocker| position.piece_at(blocker))
        .any(|(piece, color)| color == by_color && pieces.contains(&piece))
}

/// Returns true if the given square is attacked by the given color.
///
/// Occupancy of `sq` itself is irrelevant; the answer is the same whether it
/// is empty, friendly or hostile.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    // A `by_color` pawn captures onto `sq` from one row behind it.
    let pawn_row = -by_color.pawn_row_step();
    let pawn_sources = [(-1, pawn_row), (1, pawn_row)];

    attacked_by_step(position, sq, &pawn_sources, by_color, &[Piece::Pawn])
        || attacked_by_step(position, sq, &KNIGHT_OFFSETS, by_color, &[Piece::Knight])
        || attacked_by_step(position, sq, &KING_OFFSETS, by_color, &[Piece::King])
        || attacked_by_ray(
            position,
            sq,
            &DIAGONALS,
            by_color,
            &[Piece::Bishop, Piece::Queen],
        )
        || attacked_by_ray(
            position,
            sq,
            &ORTHOGONALS,
            by_color,
            &[Piece::Rook, Piece::Queen],
        )
}

/// Returns true if the king of the given color is in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    is_square_attacked(
        position,
        position.king_square(king_color),
        king_color.opposite(),
    )
}
