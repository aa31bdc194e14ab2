use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors that can occur when parsing or validating a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 6 rows, got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} cells, expected 7")]
    WrongRowLength { row: usize, len: usize },

    #[error("unknown cell '{ch}' at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, ch: char },

    #[error("piece at ({row}, {col}) is floating above an empty cell")]
    FloatingPiece { row: usize, col: usize },

    #[error("unreachable piece counts (red: {red}, yellow: {yellow})")]
    PieceCountMismatch { red: usize, yellow: usize },

    #[error("both sides have four in a row")]
    BothSidesWon,

    #[error("{0} has four in a row but the other side moved afterwards")]
    MoveAfterWin(Player),
}

/// Errors that can occur while driving a match.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("{agent} selected illegal column {column}: {source}")]
    IllegalMove {
        agent: String,
        column: usize,
        source: MoveError,
    },

    #[error("{agent} returned no move on a non-terminal board")]
    NoMove { agent: String },

    #[error("game should be terminal but has no outcome")]
    MissingOutcome,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::FloatingPiece { row: 2, col: 4 };
        assert_eq!(
            err.to_string(),
            "piece at (2, 4) is floating above an empty cell"
        );
    }

    #[test]
    fn test_match_error_display() {
        let err = MatchError::IllegalMove {
            agent: "Random".to_string(),
            column: 3,
            source: MoveError::ColumnFull(3),
        };
        assert_eq!(
            err.to_string(),
            "Random selected illegal column 3: column 3 is full"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be >= 1"
        );
    }
}
