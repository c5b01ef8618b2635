use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{NumberMode, DEFAULT_PRECISION, MAX_PRECISION};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "arith.toml";

/// Configuration loaded from arith.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub numbers: NumbersConfig,
    #[serde(default)]
    pub repl: ReplConfig,
}

/// Output formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum fractional digits printed for decimal results
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

/// Numeric behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NumbersConfig {
    #[serde(default)]
    pub mode: NumberMode,
}

/// Interactive prompt settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Prompt text shown before each line
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Maximum number of entries kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Where history is persisted; history stays in memory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_limit: default_history_limit(),
            history_file: None,
        }
    }
}

fn default_prompt() -> String {
    "arith".to_string()
}

fn default_history_limit() -> usize {
    100
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Try to load config from arith.toml in the given directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(
        mut self,
        precision: Option<usize>,
        mode: Option<NumberMode>,
    ) -> Result<Self, ConfigError> {
        if let Some(p) = precision {
            self.display.precision = p;
        }
        if let Some(m) = mode {
            self.numbers.mode = m;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check values that serde cannot bound on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.display.precision));
        }
        Ok(())
    }

    /// Resolve the history file against the directory the config came from
    pub fn history_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.repl.history_file.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                base_dir.join(p)
            }
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
    #[error("Precision {0} is out of range (at most {max})", max = MAX_PRECISION)]
    InvalidPrecision(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.precision, 10);
        assert_eq!(config.numbers.mode, NumberMode::Exact);
        assert_eq!(config.repl.prompt, "arith");
        assert_eq!(config.repl.history_limit, 100);
        assert!(config.repl.history_file.is_none());
    }

    #[test]
    fn test_config_with_overrides() {
        let config = Config::default()
            .with_overrides(Some(3), Some(NumberMode::Float))
            .unwrap();
        assert_eq!(config.display.precision, 3);
        assert_eq!(config.numbers.mode, NumberMode::Float);
    }

    #[test]
    fn test_config_without_overrides_is_unchanged() {
        let config = Config::default().with_overrides(None, None).unwrap();
        assert_eq!(config.display.precision, 10);
        assert_eq!(config.numbers.mode, NumberMode::Exact);
    }

    #[test]
    fn test_config_rejects_excessive_precision() {
        assert!(matches!(
            Config::default().with_overrides(Some(70_000), None),
            Err(ConfigError::InvalidPrecision(70_000))
        ));
        assert!(Config::default()
            .with_overrides(Some(MAX_PRECISION), None)
            .is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[display]
precision = 4

[numbers]
mode = "float"

[repl]
history_file = "history.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.precision, 4);
        assert_eq!(config.numbers.mode, NumberMode::Float);
        assert_eq!(config.repl.prompt, "arith"); // default
        assert_eq!(config.repl.history_limit, 100); // default
        assert_eq!(
            config.repl.history_file,
            Some(PathBuf::from("history.json"))
        );
    }

    #[test]
    fn test_parse_toml_rejects_unknown_mode() {
        let result: Result<Config, _> = toml::from_str("[numbers]\nmode = \"fuzzy\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_history_path_relative_and_absolute() {
        let mut config = Config::default();
        assert_eq!(config.history_path(Path::new("/work")), None);

        config.repl.history_file = Some(PathBuf::from("hist.json"));
        assert_eq!(
            config.history_path(Path::new("/work")),
            Some(PathBuf::from("/work/hist.json"))
        );

        config.repl.history_file = Some(PathBuf::from("/var/hist.json"));
        assert_eq!(
            config.history_path(Path::new("/work")),
            Some(PathBuf::from("/var/hist.json"))
        );
    }
}
