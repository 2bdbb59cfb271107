use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{GameMode, Player};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub bot: BotConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Color the bot plays in single-player games; the human takes the other.
    pub bot_player: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: GameMode::SinglePlayerVsBot,
            bot_player: Player::B,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Seed for the random fallback tier. Unset means OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause before the bot's token starts falling.
    pub bot_delay_ms: u64,
    /// Time a falling token spends on each row.
    pub drop_frame_ms: u64,
    pub log_file: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            bot_delay_ms: 600,
            drop_frame_ms: 40,
            log_file: PathBuf::from("connect_four.log"),
        }
    }
}

const MAX_BOT_DELAY_MS: u64 = 10_000;

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.drop_frame_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.drop_frame_ms must be > 0".into(),
            ));
        }
        if self.ui.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "ui.bot_delay_ms must be <= {MAX_BOT_DELAY_MS}"
            )));
        }
        if self.ui.log_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "ui.log_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.mode, GameMode::SinglePlayerVsBot);
        assert_eq!(config.game.bot_player, Player::B);
        assert_eq!(config.bot.seed, None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
mode = "two-player"

[bot]
seed = 42
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.mode, GameMode::TwoPlayer);
        assert_eq!(config.game.bot_player, Player::B);
        assert_eq!(config.bot.seed, Some(42));
        assert_eq!(config.ui.drop_frame_ms, 40);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.game.mode, default.game.mode);
        assert_eq!(config.ui.bot_delay_ms, default.ui.bot_delay_ms);
    }

    #[test]
    fn test_bot_player_parses_lowercase() {
        let config: AppConfig = toml::from_str("[game]\nbot_player = \"a\"\n").unwrap();
        assert_eq!(config.game.bot_player, Player::A);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[game]\nmode = \"online\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_frame() {
        let mut config = AppConfig::default();
        config.ui.drop_frame_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_bot_delay() {
        let mut config = AppConfig::default();
        config.ui.bot_delay_ms = MAX_BOT_DELAY_MS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_log_file() {
        let mut config = AppConfig::default();
        config.ui.log_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.ui.bot_delay_ms, 600);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[ui]
bot_delay_ms = 250
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.ui.bot_delay_ms, 250);
        // Others are defaults
        assert_eq!(config.ui.drop_frame_ms, 40);
        assert_eq!(config.game.mode, GameMode::SinglePlayerVsBot);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[ui]\ndrop_frame_ms = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
