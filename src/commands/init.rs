use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use dialoguer::{theme::ColorfulTheme, Select};

use crate::error::CalcError;
use crate::models::{NumberMode, CONFIG_FILE_NAME};

const CONFIG_TEMPLATE: &str = r#"# arith configuration

[display]
# Maximum fractional digits shown for decimal results
precision = 10

[numbers]
# "exact": integers stay integers while results are exact, overflow is an error
# "float": everything is evaluated as a 64-bit float
mode = "{mode}"

[repl]
prompt = "arith"
history_limit = 100
# Uncomment to keep history between sessions
# history_file = ".arith_history.json"
"#;

/// Render the default config file for a number mode
pub fn config_template(mode: NumberMode) -> String {
    CONFIG_TEMPLATE.replace("{mode}", mode.name())
}

/// Write arith.toml with the specified or selected number mode
pub fn init_config(
    project_root: &Path,
    mode: Option<NumberMode>,
    force: bool,
) -> Result<PathBuf, CalcError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        return Err(CalcError::ConfigExists(config_path));
    }

    let mode = match mode {
        Some(m) => m,
        None => prompt_for_mode()?,
    };

    fs::write(&config_path, config_template(mode))?;
    info!("Created {} ({} mode)", config_path.display(), mode);
    println!("Created {}", config_path.display());

    Ok(config_path)
}

fn prompt_for_mode() -> Result<NumberMode, CalcError> {
    let modes = [NumberMode::Exact, NumberMode::Float];
    let labels = [
        "exact - integers stay integers, overflow is reported",
        "float - everything is a 64-bit float",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select number mode")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| CalcError::Prompt(e.to_string()))?;

    Ok(modes[selection])
}
