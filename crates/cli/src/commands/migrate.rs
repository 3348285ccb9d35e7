use anyhow::{Context, Result};
use shtidy_core::services::{run_migration, FileMigration, FsWriter, MigrationStatus};

use crate::commands::{dry_run_prefix, load_config};

fn print_migration(entry: &FileMigration, dry_run: bool) {
    let prefix = dry_run_prefix(dry_run);
    match &entry.status {
        MigrationStatus::Migrated { blocks } => {
            println!("✅ {prefix}Successfully migrated: {} ({blocks} block(s))", entry.path)
        }
        MigrationStatus::Unchanged => println!("⚠️  No changes made to: {}", entry.path),
        MigrationStatus::Failed { reason } => {
            println!("❌ Error migrating {}: {}", entry.path, reason)
        }
    }
}

/// Replace legacy dual-bootstrap blocks. Returns `true` when no file failed.
pub fn migrate_bootstrap_command(
    root: &str,
    config: Option<&str>,
    dry_run: bool,
    json: bool,
) -> Result<bool> {
    let (root_path, config) = load_config(root, config)?;

    if !json {
        println!("🚀 Starting bootstrap migration...");
    }

    let summary = run_migration(&root_path, &config.migration, &FsWriter, dry_run, |entry| {
        if !json {
            print_migration(entry, dry_run);
        }
    })
    .with_context(|| format!("Failed to migrate {}", root_path.display()))?;

    if json {
        let serialized = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize migration summary")?;
        println!("{}", serialized);
        return Ok(summary.is_success());
    }

    if summary.candidates == 0 {
        println!("✅ No files need migration! ({} shell files checked)", summary.checked);
        return Ok(true);
    }

    println!();
    println!("📈 Migration Summary:");
    println!("✅ Files migrated: {}", summary.migrated);
    println!("⚠️  Files without a matching block: {}", summary.unchanged);
    println!("❌ Files with errors: {}", summary.failed);
    println!("🎯 Files needing migration: {}", summary.candidates);
    println!("📁 Total files checked: {}", summary.checked);

    if summary.is_success() {
        println!("🎉 Bootstrap migration completed successfully!");
    } else {
        println!("⚠️  Bootstrap migration completed with errors");
    }

    Ok(summary.is_success())
}
