use anyhow::{Context, Result};
use shtidy_core::audit::{render_report, run_audit};

use crate::commands::load_config;

/// Audit the tree under `root`. Returns `true` when no issue was found.
pub fn audit_command(root: &str, config: Option<&str>, json: bool) -> Result<bool> {
    let (root_path, config) = load_config(root, config)?;

    if !json {
        println!("🚀 Starting comprehensive project audit...");
        println!("📁 Auditing directory: {}", root_path.display());
    }

    let report = run_audit(&root_path, config.audit)
        .with_context(|| format!("Failed to audit {}", root_path.display()))?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize audit report")?;
        println!("{}", serialized);
        return Ok(report.is_clean());
    }

    println!();
    print!("{}", render_report(&report));
    println!();
    println!("✅ Audit completed!");
    println!("Found {} issues across the project.", report.total_issues);

    Ok(report.is_clean())
}
