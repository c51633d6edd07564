//! Session configuration: game mode, AI strength and the human's side.

use crate::games::jungle::{Difficulty, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who plays the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    HumanVsHuman,
    /// One side is played by the engine's AI.
    HumanVsAi,
}

/// Settings supplied by the caller when a new game starts.
///
/// Can be written as TOML:
///
/// ```toml
/// mode = "human_vs_ai"
/// difficulty = 3
/// human_side = "red"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Local or against the AI.
    #[serde(default)]
    mode: GameMode,

    /// AI search horizon (ignored for local games).
    #[serde(default)]
    difficulty: Difficulty,

    /// Side the human plays in an AI game.
    #[serde(default = "default_human_side")]
    human_side: Player,
}

fn default_human_side() -> Player {
    Player::Blue
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::local()
    }
}

impl SessionConfig {
    /// Two humans, no AI.
    pub fn local() -> Self {
        Self {
            mode: GameMode::HumanVsHuman,
            difficulty: Difficulty::default(),
            human_side: default_human_side(),
        }
    }

    /// A human playing `human_side` against the AI.
    #[instrument]
    pub fn against_ai(difficulty: Difficulty, human_side: Player) -> Self {
        Self {
            mode: GameMode::HumanVsAi,
            difficulty,
            human_side,
        }
    }

    /// The AI-controlled side, if any.
    pub fn ai_side(&self) -> Option<Player> {
        match self.mode {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsAi => Some(self.human_side.opponent()),
        }
    }

    /// Whether `player` is played by the AI.
    pub fn is_ai(&self, player: Player) -> bool {
        self.ai_side() == Some(player)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not a valid configuration.
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading session config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(mode = %config.mode, difficulty = %config.difficulty, "Session config loaded");
        Ok(config)
    }
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
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
