//! Display labels for board cells.

use crate::Position;
use chess_core::{Color, Piece, Square};
use thiserror::Error;

/// A label key that names neither a FEN piece letter nor `empty`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label key {0:?}, expected a FEN piece letter or \"empty\"")]
pub struct UnknownLabelKey(pub String);

/// Lookup table from cell contents to a display label.
///
/// The default labels are HTML class names such as `"piece white-king"` and
/// `"empty-square"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    empty: String,
    pieces: [[String; 6]; 2],
}

impl LabelTable {
    /// Returns the label for a cell.
    pub fn label(&self, cell: Option<(Piece, Color)>) -> &str {
        match cell {
            Some((piece, color)) => &self.pieces[color.index()][piece.index()],
            None => &self.empty,
        }
    }

    /// Replaces the label for a cell.
    pub fn set(&mut self, cell: Option<(Piece, Color)>, label: impl Into<String>) {
        let slot = match cell {
            Some((piece, color)) => &mut self.pieces[color.index()][piece.index()],
            None => &mut self.empty,
        };
        *slot = label.into();
    }

    /// Replaces the label named by `key`: a FEN piece letter, or `empty`.
    pub fn set_by_key(&mut self, key: &str, label: impl Into<String>) -> Result<(), UnknownLabelKey> {
        let cell = match key {
            "empty" => None,
            _ => {
                let mut chars = key.chars();
                match (chars.next().and_then(Piece::from_fen_char), chars.next()) {
                    (Some(cell), None) => Some(cell),
                    _ => return Err(UnknownLabelKey(key.to_string())),
                }
            }
        };
        self.set(cell, label);
        Ok(())
    }

    /// Returns the 64 labels of the board, a8 to h1.
    pub fn board<'a>(&'a self, position: &Position) -> Vec<&'a str> {
        Square::all()
            .map(|sq| self.label(position.piece_at(sq)))
            .collect()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        let names = |color: &str| {
            Piece::ALL.map(|piece| format!("piece {color}-{}", piece.to_string().to_lowercase()))
        };
        LabelTable {
            empty: "empty-square".to_string(),
            pieces: [names("white"), names("black")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_labels() {
        let table = LabelTable::default();
        assert_eq!(table.label(None), "empty-square");
        assert_eq!(
            table.label(Some((Piece::King, Color::White))),
            "piece white-king"
        );
        assert_eq!(
            table.label(Some((Piece::Knight, Color::Black))),
            "piece black-knight"
        );
    }

    #[test]
    fn board_order() {
        let table = LabelTable::default();
        let labels = table.board(&Position::startpos());
        assert_eq!(labels.len(), 64);
        assert_eq!(labels[0], "piece black-rook");
        assert_eq!(labels[4], "piece black-king");
        assert_eq!(labels[8], "piece black-pawn");
        assert_eq!(labels[32], "empty-square");
        assert_eq!(labels[60], "piece white-king");
        assert_eq!(labels[63], "piece white-rook");
    }

    #[test]
    fn overrides() {
        let mut table = LabelTable::default();
        table.set_by_key("K", "♔").unwrap();
        table.set_by_key("empty", ".").unwrap();
        assert_eq!(table.label(Some((Piece::King, Color::White))), "♔");
        assert_eq!(table.label(Some((Piece::King, Color::Black))), "piece black-king");
        assert_eq!(table.label(None), ".");
    }

    #[test]
    fn bad_keys() {
        let mut table = LabelTable::default();
        for key in ["", "x", "KK", "Empty", "1"] {
            assert_eq!(
                table.set_by_key(key, "?"),
                Err(UnknownLabelKey(key.to_string()))
            );
        }
        assert_eq!(table, LabelTable::default());
    }
}
