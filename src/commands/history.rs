use std::path::Path;
use tracing::info;

use crate::core::open_history;
use crate::error::CalcError;
use crate::models::Config;

/// Show the persisted history, or wipe it with `clear`
pub fn show_history(project_root: &Path, config: &Config, clear: bool) -> Result<(), CalcError> {
    let mut history = open_history(project_root, config)?;

    if history.path().is_none() {
        println!("History is not persisted. Set repl.history_file in arith.toml to keep it.");
        return Ok(());
    }

    if clear {
        let count = history.len();
        history.clear();
        history.save()?;
        info!("Cleared {} history entries", count);
        println!("Cleared {} history entries", count);
        return Ok(());
    }

    if history.is_empty() {
        println!("History is empty.");
        return Ok(());
    }

    println!("=== arith history ===\n");
    for entry in history.entries() {
        println!(
            "{}  {}",
            entry.evaluated_at.format("%Y-%m-%d %H:%M:%S"),
            entry.display_line(config.display.precision)
        );
    }

    let failures = history.entries().filter(|e| !e.is_success()).count();
    if failures > 0 {
        println!("\n{} of {} entries failed", failures, history.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoryManager;
    use crate::models::Value;
    use tempfile::TempDir;

    #[test]
    fn test_clear_persisted_history() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.repl.history_file = Some("history.json".into());

        let path = temp_dir.path().join("history.json");
        let mut history = HistoryManager::open(&path, 10).unwrap();
        history.record_success("1 + 1", Value::Integer(2));
        history.save().unwrap();

        show_history(temp_dir.path(), &config, true).unwrap();

        let reloaded = HistoryManager::open(&path, 10).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_show_without_history_file() {
        let temp_dir = TempDir::new().unwrap();
        show_history(temp_dir.path(), &Config::default(), false).unwrap();
        assert!(!temp_dir.path().join("history.json").exists());
    }
}
