use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::TidyResult;
use crate::model::SourceFile;
use crate::services::backup::{write_with_backup, ContentWriter};
use crate::transform::strip_command_blocks;

/// Outcome of cleaning the monolithic command file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CleanupStatus {
    /// Content changed; `bytes_removed` is the size difference.
    Cleaned { bytes_removed: usize },
    Unchanged,
}

/// Strip the extracted `commands` from the file at `path`.
///
/// Unlike the batch services, errors are returned: there is only one file.
pub fn cleanup_commands_file<S: AsRef<str>>(
    path: &Path,
    commands: &[S],
    writer: &dyn ContentWriter,
    dry_run: bool,
) -> TidyResult<CleanupStatus> {
    let source = SourceFile::load(path)?;
    let cleaned = strip_command_blocks(&source.content, commands)?;

    if cleaned == source.content {
        debug!(path = %path.display(), "command file already clean");
        return Ok(CleanupStatus::Unchanged);
    }

    let bytes_removed = source.byte_len().saturating_sub(cleaned.len());
    if !dry_run {
        write_with_backup(path, &cleaned, writer)?;
    }
    Ok(CleanupStatus::Cleaned { bytes_removed })
}
