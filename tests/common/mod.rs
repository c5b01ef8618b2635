//! Common test utilities

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a working directory with an arith.toml
pub fn create_test_project(config: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_root = temp_dir.path().to_path_buf();

    fs::write(project_root.join("arith.toml"), config).expect("Failed to write arith.toml");

    (temp_dir, project_root)
}

/// Create a working directory whose config persists history to `history.json`
pub fn create_project_with_history(limit: usize) -> (TempDir, PathBuf) {
    create_test_project(&format!(
        r#"
[repl]
history_limit = {}
history_file = "history.json"
"#,
        limit
    ))
}

/// Convert string literals into owned expressions
pub fn expressions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
