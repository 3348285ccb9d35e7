use anyhow::{Context, Result};
use shtidy_core::services::{run_consolidation, FileUpdate, FsWriter, UpdateStatus};

use crate::commands::{dry_run_prefix, load_config};

fn print_update(entry: &FileUpdate, dry_run: bool) {
    match &entry.status {
        UpdateStatus::Updated { imports_added, functions_removed } => {
            let imports: Vec<&str> = imports_added.iter().map(|fw| fw.as_str()).collect();
            let imports = if imports.is_empty() { "none".to_string() } else { imports.join(", ") };
            println!(
                "✅ {}Updated: {} (imports added: {}, local functions removed: {})",
                dry_run_prefix(dry_run),
                entry.path,
                imports,
                functions_removed
            );
        }
        UpdateStatus::Unchanged => {}
        UpdateStatus::Failed { reason } => println!("❌ Error updating {}: {}", entry.path, reason),
    }
}

/// Make files source the shared frameworks instead of redefining their functions.
///
/// Per-file failures are reported but do not make the command fail.
pub fn consolidate_command(
    root: &str,
    config: Option<&str>,
    dry_run: bool,
    json: bool,
) -> Result<bool> {
    let (root_path, config) = load_config(root, config)?;

    if !json {
        println!("🔧 Starting duplicate function consolidation...");
    }

    let summary =
        run_consolidation(&root_path, &config.consolidation, &FsWriter, dry_run, |entry| {
            if !json {
                print_update(entry, dry_run);
            }
        })
        .with_context(|| format!("Failed to consolidate {}", root_path.display()))?;

    if json {
        let serialized = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize consolidation summary")?;
        println!("{}", serialized);
        return Ok(true);
    }

    if summary.candidates == 0 {
        println!("✅ No files need updating! ({} shell files scanned)", summary.scanned);
        return Ok(true);
    }

    println!();
    println!("📈 Consolidation Summary:");
    println!("📊 Files with framework functions: {}", summary.candidates);
    println!("✅ Files updated: {}", summary.files_updated);
    println!("🔧 Total changes: {}", summary.changes_made);
    if summary.failed > 0 {
        println!("❌ Files with errors: {}", summary.failed);
    }

    if summary.files_updated > 0 {
        println!("🎉 Duplicate function consolidation completed!");
    } else {
        println!("ℹ️  No changes were needed");
    }

    Ok(true)
}
