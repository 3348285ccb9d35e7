use anyhow::{Context, Result};
use shtidy_core::config::find_config_file;

use crate::commands::load_config;

/// Print the effective configuration (defaults merged with any config file).
pub fn show_config_command(root: &str, config: Option<&str>) -> Result<()> {
    let (root_path, effective) = load_config(root, config)?;

    let source = match config {
        Some(path) => path.to_string(),
        None => find_config_file(&root_path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string()),
    };
    eprintln!("Config source: {}", source);

    let serialized =
        serde_json::to_string_pretty(&effective).context("Failed to serialize config")?;
    println!("{}", serialized);
    Ok(())
}
