//! Game configuration loaded from TOML.
//!
//! ```toml
//! scripted_move_delay_ms = 1000
//! end_screen_delay_ms = 1000
//! log_file = "noughts.log"
//!
//! [player_x]
//! name = "Ada"
//! kind = "human"
//!
//! [player_o]
//! name = "Computer"
//! kind = "computer"
//! ```

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts::{PlayerKind, PlayerSetup};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Setup for the X side.
    #[serde(default = "default_player_x")]
    player_x: PlayerSetup,

    /// Setup for the O side.
    #[serde(default = "default_player_o")]
    player_o: PlayerSetup,

    /// Pause before a scripted player moves, in milliseconds.
    #[serde(default = "default_delay_ms")]
    scripted_move_delay_ms: u64,

    /// Pause between the deciding move and the end screen, in milliseconds.
    #[serde(default = "default_delay_ms")]
    end_screen_delay_ms: u64,

    /// File receiving log output.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_player_x() -> PlayerSetup {
    PlayerSetup::new("Player X", PlayerKind::Human)
}

fn default_player_o() -> PlayerSetup {
    PlayerSetup::new("Computer", PlayerKind::Scripted)
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("noughts.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_x: default_player_x(),
            player_o: default_player_o(),
            scripted_move_delay_ms: default_delay_ms(),
            end_screen_delay_ms: default_delay_ms(),
            log_file: default_log_file(),
        }
    }
}

/// Values given on the command line, each replacing its config field when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Name for X.
    pub x_name: Option<String>,
    /// Kind for X.
    pub x_kind: Option<PlayerKind>,
    /// Name for O.
    pub o_name: Option<String>,
    /// Kind for O.
    pub o_kind: Option<PlayerKind>,
    /// Scripted move delay in milliseconds.
    pub delay_ms: Option<u64>,
    /// Log file path.
    pub log_file: Option<PathBuf>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            player_x = %config.player_x.name(),
            player_o = %config.player_o.name(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            x_name,
            x_kind,
            o_name,
            o_kind,
            delay_ms,
            log_file,
        } = overrides;

        self.player_x = merge_setup(&self.player_x, x_name, x_kind);
        self.player_o = merge_setup(&self.player_o, o_name, o_kind);
        if let Some(ms) = delay_ms {
            self.scripted_move_delay_ms = ms;
        }
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self
    }

    /// Pause before a scripted player moves.
    pub fn scripted_move_delay(&self) -> Duration {
        Duration::from_millis(self.scripted_move_delay_ms)
    }

    /// Pause before the end screen appears.
    pub fn end_screen_delay(&self) -> Duration {
        Duration::from_millis(self.end_screen_delay_ms)
    }
}

fn merge_setup(base: &PlayerSetup, name: Option<String>, kind: Option<PlayerKind>) -> PlayerSetup {
    PlayerSetup::new(
        name.unwrap_or_else(|| base.name().clone()),
        kind.unwrap_or(*base.kind()),
    )
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
