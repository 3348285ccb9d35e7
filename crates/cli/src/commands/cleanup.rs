use std::path::Path;

use anyhow::Result;
use shtidy_core::services::{cleanup_commands_file, CleanupStatus, FsWriter};

use crate::commands::{dry_run_prefix, load_config};

/// Remove extracted command implementations from the monolithic command file.
///
/// `file` is relative to the root unless absolute; `commands` overrides the
/// configured command names when non-empty. Returns `false` if the file could
/// not be cleaned.
pub fn cleanup_commands_command(
    root: &str,
    config: Option<&str>,
    file: Option<&str>,
    commands: &[String],
    dry_run: bool,
) -> Result<bool> {
    let (root_path, config) = load_config(root, config)?;

    let file = file.unwrap_or(&config.cleanup.commands_file);
    let file_path = {
        let p = Path::new(file);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            root_path.join(p)
        }
    };
    let commands = if commands.is_empty() { config.cleanup.commands.as_slice() } else { commands };

    println!("🧹 Cleaning up {}...", file);

    match cleanup_commands_file(&file_path, commands, &FsWriter, dry_run) {
        Ok(CleanupStatus::Cleaned { bytes_removed }) => {
            println!(
                "✅ {}Cleaned up {} ({} bytes removed)",
                dry_run_prefix(dry_run),
                file,
                bytes_removed
            );
            Ok(true)
        }
        Ok(CleanupStatus::Unchanged) => {
            println!("✅ {} is already clean", file);
            Ok(true)
        }
        Err(err) => {
            println!("❌ Error cleaning up {}: {}", file, err);
            Ok(false)
        }
    }
}
