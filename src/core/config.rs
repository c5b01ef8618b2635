use std::path::Path;
use tracing::info;

use crate::core::HistoryManager;
use crate::error::CalcError;
use crate::models::{Config, NumberMode};

/// Load configuration from the working directory with CLI overrides
pub fn load_config(
    project_root: &Path,
    precision: Option<usize>,
    mode: Option<NumberMode>,
) -> Result<Config, CalcError> {
    let config = Config::load_from_dir(project_root)?;
    let config = config.with_overrides(precision, mode)?;

    info!(
        "Configuration loaded: mode={}, precision={}",
        config.numbers.mode, config.display.precision
    );

    Ok(config)
}

/// Open the history described by the config: file-backed when a history
/// file is configured, in memory otherwise
pub fn open_history(project_root: &Path, config: &Config) -> Result<HistoryManager, CalcError> {
    let limit = config.repl.history_limit;
    match config.history_path(project_root) {
        Some(path) => Ok(HistoryManager::open(&path, limit)?),
        None => Ok(HistoryManager::new(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(temp_dir.path(), None, None).unwrap();

        assert_eq!(config.display.precision, 10);
        assert_eq!(config.numbers.mode, NumberMode::Exact);
    }

    #[test]
    fn test_load_config_with_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("arith.toml"),
            r#"
[display]
precision = 3

[numbers]
mode = "float"
"#,
        )
        .unwrap();

        let config = load_config(temp_dir.path(), None, None).unwrap();
        assert_eq!(config.display.precision, 3);
        assert_eq!(config.numbers.mode, NumberMode::Float);
    }

    #[test]
    fn test_load_config_cli_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("arith.toml"), "[display]\nprecision = 3\n").unwrap();

        let config = load_config(temp_dir.path(), Some(6), Some(NumberMode::Float)).unwrap();
        assert_eq!(config.display.precision, 6);
        assert_eq!(config.numbers.mode, NumberMode::Float);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("arith.toml"), "[display\nprecision = ").unwrap();

        let result = load_config(temp_dir.path(), None, None);
        assert!(matches!(result, Err(CalcError::Config(_))));
    }

    #[test]
    fn test_load_config_precision_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("arith.toml"), "[display]\nprecision = 70000\n").unwrap();

        let result = load_config(temp_dir.path(), None, None);
        assert!(matches!(
            result,
            Err(CalcError::Config(ConfigError::InvalidPrecision(70000)))
        ));

        let empty_dir = TempDir::new().unwrap();
        let result = load_config(empty_dir.path(), Some(100_000), None);
        assert!(matches!(
            result,
            Err(CalcError::Config(ConfigError::InvalidPrecision(100_000)))
        ));
    }

    #[test]
    fn test_open_history_in_memory_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let history = open_history(temp_dir.path(), &Config::default()).unwrap();
        assert!(history.path().is_none());
        assert_eq!(history.limit(), 100);
    }

    #[test]
    fn test_open_history_relative_to_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.repl.history_file = Some("hist.json".into());

        let history = open_history(temp_dir.path(), &config).unwrap();
        assert_eq!(history.path(), Some(temp_dir.path().join("hist.json").as_path()));
    }
}
