use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

const DEFAULT_GAME_CONFIG_YAML: &str = include_str!("../../config/game.default.yaml");

/// Placeholder replaced by the guessed item in `guess_template`.
pub const ITEM_PLACEHOLDER: &str = "{item}";

/// Texts the game emits and the tree it starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub guess_template: String,
    pub win_message: String,
    pub give_up_message: String,
    pub seed: SeedConfig,
}

/// The initial question and its two guesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub question: String,
    pub yes_item: String,
    pub no_item: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            guess_template: "Is it {item}?".to_string(),
            win_message: "Hooray, I guessed it!".to_string(),
            give_up_message: "I give up. What were you thinking of?".to_string(),
            seed: SeedConfig::default(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            question: "Is it edible?".to_string(),
            yes_item: "Chocolate".to_string(),
            no_item: "Flowers".to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a game config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GameConfigError> {
        let config: GameConfig = serde_yaml::from_str(yaml).map_err(GameConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a game config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, GameConfigError> {
        let yaml = fs::read_to_string(path).map_err(GameConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_GAME_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, GameConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Render the prompt for a guess.
    pub fn format_guess(&self, item: &str) -> String {
        self.guess_template.replace(ITEM_PLACEHOLDER, item)
    }

    fn validate(&self) -> Result<(), GameConfigError> {
        if !self.guess_template.contains(ITEM_PLACEHOLDER) {
            return Err(GameConfigError::Invalid(format!(
                "guess_template must contain {ITEM_PLACEHOLDER}"
            )));
        }
        let required = [
            ("win_message", &self.win_message),
            ("give_up_message", &self.give_up_message),
            ("seed.question", &self.seed.question),
            ("seed.yes_item", &self.seed.yes_item),
            ("seed.no_item", &self.seed.no_item),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(GameConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Error type for loading and validating `GameConfig`.
#[derive(Debug)]
pub enum GameConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for GameConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            GameConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            GameConfigError::Invalid(err) => write!(f, "invalid game config: {err}"),
        }
    }
}

impl std::error::Error for GameConfigError {}
