use std::path::PathBuf;

/// Reasons a drop request is turned down. None of these end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is not on the board (expected 0-6)")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("a move is still in flight")]
    MoveInFlight,
}

/// Checked board access outside the 6x7 grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfRange { row: usize, col: usize },
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
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is not on the board (expected 0-6)"
        );
        assert_eq!(MoveError::ColumnFull(2).to_string(), "column 2 is full");
        assert_eq!(
            MoveError::GameAlreadyOver.to_string(),
            "the game is already over"
        );
    }

    #[test]
    fn test_board_error_display() {
        let err = BoardError::OutOfRange { row: 6, col: 1 };
        assert_eq!(err.to_string(), "cell (6, 1) is outside the board");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ui.drop_frame_ms must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ui.drop_frame_ms must be > 0"
        );
    }
}
