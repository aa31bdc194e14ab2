use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::ai::{Agent, MinimaxAgent, RandomAgent, RuleBasedAgent, SearchConfig};
use crate::error::ConfigError;
use crate::game::{Player, COLS, ROWS};

/// Deepest search that can matter: one ply per cell.
pub const MAX_DEPTH: u32 = (ROWS * COLS) as u32;

/// Kind of agent seated on one side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    Random,
    Rules,
    Minimax,
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "rules" => Ok(AgentKind::Rules),
            "minimax" => Ok(AgentKind::Minimax),
            other => Err(format!(
                "unknown agent '{other}' (expected 'random', 'rules', or 'minimax')"
            )),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AgentKind::Random => "random",
            AgentKind::Rules => "rules",
            AgentKind::Minimax => "minimax",
        })
    }
}

/// Who plays each side.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub red: AgentKind,
    pub yellow: AgentKind,
    /// Seed for agents that use randomness. Red gets `seed`, Yellow `seed + 1`.
    /// Unset means seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            red: AgentKind::Minimax,
            yellow: AgentKind::Rules,
            seed: None,
        }
    }
}

impl PlayersConfig {
    /// Build the agent configured for `player`.
    pub fn agent_for(&self, player: Player, search: &SearchConfig) -> Box<dyn Agent> {
        let (kind, seed) = match player {
            Player::Red => (self.red, self.seed),
            Player::Yellow => (self.yellow, self.seed.map(|s| s.wrapping_add(1))),
        };
        build_agent(kind, search, seed)
    }
}

/// Construct an agent of the given kind.
pub fn build_agent(kind: AgentKind, search: &SearchConfig, seed: Option<u64>) -> Box<dyn Agent> {
    match (kind, seed) {
        (AgentKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
        (AgentKind::Random, None) => Box::new(RandomAgent::new()),
        (AgentKind::Rules, Some(seed)) => Box::new(RuleBasedAgent::with_seed(seed)),
        (AgentKind::Rules, None) => Box::new(RuleBasedAgent::new()),
        (AgentKind::Minimax, _) => Box::new(MinimaxAgent::from_config(search.clone())),
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub players: PlayersConfig,
}

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
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }
        if self.search.depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {MAX_DEPTH}"
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
