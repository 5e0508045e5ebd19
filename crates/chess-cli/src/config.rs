//! Configuration file loading for the command-line front end.
//!
//! Settings come from `chess-cli.toml` in the working directory, or from the
//! file passed with `--config`. A missing default file means defaults.

use chess_core::FenParser;
use chess_rules::{LabelTable, UnknownLabelKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A `[labels]` key names no board cell.
    #[error("Invalid label override: {0}")]
    LabelError(#[from] UnknownLabelKey),
}

/// Settings for the command-line front end.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level filter: `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Separator placed between entries of list output.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Position used when a command is given no FEN.
    #[serde(default = "default_start_fen")]
    pub start_fen: String,
    /// Label overrides keyed by FEN piece letter or `empty`.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_start_fen() -> String {
    FenParser::STARTPOS.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_level: default_log_level(),
            separator: default_separator(),
            start_fen: default_start_fen(),
            labels: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the file at
    /// [`Self::config_path()`] is read if present, otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration path, `chess-cli.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-cli.toml")
    }

    /// Builds the label table with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LabelError`] for a key that is neither a FEN
    /// piece letter nor `empty`.
    pub fn label_table(&self) -> Result<LabelTable, ConfigError> {
        let mut table = LabelTable::default();
        for (key, label) in &self.labels {
            table.set_by_key(key, label.as_str())?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece};

    #[test]
    fn test_empty_config_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.separator, " ");
        assert_eq!(config.start_fen, FenParser::STARTPOS);
        assert!(config.labels.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
log_level = "debug"
separator = ","
start_fen = "8/8/8/8/8/6K1/4Q3/6k1 w - - 21 61"

[labels]
K = "WK"
k = "BK"
empty = "."
"#;

        let config: CliConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.separator, ",");
        assert_eq!(config.start_fen, "8/8/8/8/8/6K1/4Q3/6k1 w - - 21 61");
        assert_eq!(config.labels.len(), 3);

        let table = config.label_table().unwrap();
        assert_eq!(table.label(Some((Piece::King, Color::White))), "WK");
        assert_eq!(table.label(Some((Piece::King, Color::Black))), "BK");
        assert_eq!(table.label(Some((Piece::Queen, Color::White))), "piece white-queen");
        assert_eq!(table.label(None), ".");
    }

    #[test]
    fn test_unknown_label_key() {
        let config: CliConfig = toml::from_str("[labels]\nwhite-king = \"x\"\n").unwrap();
        match config.label_table() {
            Err(ConfigError::LabelError(UnknownLabelKey(key))) => assert_eq!(key, "white-king"),
            other => panic!("Expected LabelError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let result: Result<CliConfig, _> = toml::from_str("log_level = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(CliConfig::config_path(), PathBuf::from("chess-cli.toml"));
    }

    #[test]
    fn test_load_explicit_path() {
        let path = std::env::temp_dir().join(format!("chess-cli-{}.toml", std::process::id()));
        std::fs::write(&path, "separator = \"\\n\"\n").unwrap();
        let config = CliConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.separator, "\n");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = std::env::temp_dir().join("chess-cli-does-not-exist.toml");
        assert!(matches!(
            CliConfig::load(Some(&path)),
            Err(ConfigError::ReadError(_))
        ));
    }
}
