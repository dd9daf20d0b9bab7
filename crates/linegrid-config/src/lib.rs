use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Widest tab stop accepted from a config file.
pub const MAX_TAB_WIDTH: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Tab width {tab_width} is out of range, expected 1..={MAX_TAB_WIDTH}")]
    InvalidTabWidth { tab_width: usize },

    #[error("At least one line delimiter is required")]
    NoLineDelimiters,

    #[error("Line delimiter {index} is empty")]
    EmptyLineDelimiter { index: usize },
}

/// Editor settings shared by every document opened through linegrid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tab_width: usize,
    /// Legal line delimiters, in matching priority order.
    pub line_delimiters: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            line_delimiters: vec!["\n".into(), "\r\n".into(), "\r".into()],
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        self.validate()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/linegrid");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and environment variables in a user supplied path.
    ///
    /// Paths that fail to expand (an unset variable) are returned unchanged.
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => path.to_path_buf(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TAB_WIDTH).contains(&self.tab_width) {
            return Err(ConfigError::InvalidTabWidth {
                tab_width: self.tab_width,
            });
        }
        if self.line_delimiters.is_empty() {
            return Err(ConfigError::NoLineDelimiters);
        }
        if let Some(index) = self.line_delimiters.iter().position(String::is_empty) {
            return Err(ConfigError::EmptyLineDelimiter { index });
        }
        Ok(())
    }
}
