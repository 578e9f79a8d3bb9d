// src/config.rs
// Board configuration loaded from YAML, falling back to the embedded default

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievement::Achievement;
use crate::board::DEFAULT_BOARD_LIMIT;
use crate::error::{BoardError, Result};
use crate::goals::GoalDefinition;
use crate::profile::ProfileDefaults;
use crate::{log_debug, log_info};

const DEFAULT_CONFIG: &str = include_str!("../config/default.yml");

/// Looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "config.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub database_path: PathBuf,
    #[serde(default)]
    pub owner_id: Uuid,
    #[serde(default = "default_board_limit")]
    pub board_limit: usize,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub profile: ProfileDefaults,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub daily_goals: Vec<GoalDefinition>,
}

fn default_board_limit() -> usize {
    DEFAULT_BOARD_LIMIT
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl BoardConfig {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(DEFAULT_CONFIG)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: BoardConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `config.yml` in the working directory if it
    /// exists, else the embedded default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if !local.exists() {
                    log_debug!("No {} found, using embedded defaults", CONFIG_FILE_NAME);
                    return Self::embedded();
                }
                local
            }
        };

        log_info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        Self::from_yaml(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_limit == 0 {
            return Err(BoardError::Config("board_limit must be greater than 0".to_string()));
        }

        let mut keys = HashSet::new();
        for goal in &self.daily_goals {
            if goal.key.trim().is_empty() {
                return Err(BoardError::Config("daily goal key must not be empty".to_string()));
            }
            if goal.title.trim().is_empty() {
                return Err(BoardError::Config(format!("daily goal '{}' has an empty title", goal.key)));
            }
            if goal.target == 0 {
                return Err(BoardError::Config(format!("daily goal '{}' needs a target above 0", goal.key)));
            }
            if !keys.insert(goal.key.as_str()) {
                return Err(BoardError::Config(format!("duplicate daily goal key '{}'", goal.key)));
            }
        }

        for achievement in &self.achievements {
            if achievement.title.trim().is_empty() {
                return Err(BoardError::Config("achievement title must not be empty".to_string()));
            }
        }

        Ok(())
    }
}
