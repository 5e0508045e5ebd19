//! Subcommand execution.
//!
//! Each command renders its answer as a string so `main` only prints.
//! Invalid positions produce the same sentinel output as the string API
//! rather than an error.

use crate::config::CliConfig;
use chess_rules::{api, rules};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Position argument shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct FenArg {
    /// Position in FEN; defaults to `start_fen` from the config
    #[arg(short, long)]
    pub fen: Option<String>,
}

impl FenArg {
    fn resolve<'a>(&'a self, config: &'a CliConfig) -> &'a str {
        self.fen.as_deref().unwrap_or(&config.start_fen)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the game state, e.g. "White to move"
    State {
        #[command(flatten)]
        fen: FenArg,
    },
    /// List the legal destinations of the piece on a square
    Targets {
        /// Source square, e.g. "e2"
        square: String,
        #[command(flatten)]
        fen: FenArg,
    },
    /// Print whether a move is legal
    Check {
        /// Move in UCI notation, e.g. "e2e4" or "e7e8q"
        #[arg(value_name = "MOVE")]
        mv: String,
        #[command(flatten)]
        fen: FenArg,
    },
    /// Print the position after a legal move
    Next {
        /// Move in UCI notation, e.g. "e2e4" or "e7e8q"
        #[arg(value_name = "MOVE")]
        mv: String,
        #[command(flatten)]
        fen: FenArg,
    },
    /// List all legal moves
    Moves {
        #[command(flatten)]
        fen: FenArg,
    },
    /// List the display label of every square, a8 to h1
    Labels {
        #[command(flatten)]
        fen: FenArg,
    },
    /// Dump the parsed position as JSON
    Parse {
        #[command(flatten)]
        fen: FenArg,
    },
}

/// JSON view of a parsed position.
#[derive(Serialize, Debug)]
struct ParsedPosition {
    /// Board ranks 8 to 1, one FEN letter or `.` per file.
    board: Vec<String>,
    side_to_move: String,
    castling: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    en_passant: Option<String>,
    halfmove_clock: u32,
    fullmove_number: u32,
    white_king: String,
    black_king: String,
    in_check: bool,
    state: String,
}

fn parse_report(fen: &str) -> Option<ParsedPosition> {
    use chess_core::{Color, Square};

    let position = api::parse_position(fen)?;
    let cells: Vec<char> = Square::all()
        .map(|sq| match position.piece_at(sq) {
            Some((piece, color)) => piece.to_fen_char(color),
            None => '.',
        })
        .collect();

    Some(ParsedPosition {
        board: cells.chunks(8).map(|rank| rank.iter().collect()).collect(),
        side_to_move: position.side_to_move.to_string(),
        castling: position.castling.to_fen_field(),
        en_passant: position.en_passant.map(|sq| sq.to_algebraic()),
        halfmove_clock: position.halfmove_clock,
        fullmove_number: position.fullmove_number,
        white_king: position.king_square(Color::White).to_algebraic(),
        black_king: position.king_square(Color::Black).to_algebraic(),
        in_check: rules::is_check(&position),
        state: rules::game_state(&position).to_string(),
    })
}

/// Runs a command and returns its output.
pub fn run(command: &Command, config: &CliConfig) -> anyhow::Result<String> {
    let output = match command {
        Command::State { fen } => api::game_state(fen.resolve(config)).to_string(),
        Command::Targets { square, fen } => {
            api::legal_destinations(fen.resolve(config), square).join(&config.separator)
        }
        Command::Check { mv, fen } => api::is_legal_move(fen.resolve(config), mv).to_string(),
        Command::Next { mv, fen } => api::next_position(fen.resolve(config), mv),
        Command::Moves { fen } => api::legal_moves(fen.resolve(config)).join(&config.separator),
        Command::Labels { fen } => {
            let table = config.label_table()?;
            api::board_labels(fen.resolve(config), &table).join(&config.separator)
        }
        Command::Parse { fen } => {
            serde_json::to_string_pretty(&parse_report(fen.resolve(config)))?
        }
    };
    Ok(output)
}
