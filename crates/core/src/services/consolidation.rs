use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ConsolidationConfig;
use crate::discovery::{find_shell_files, DiscoveredFile};
use crate::error::TidyResult;
use crate::model::SourceFile;
use crate::scan::BraceMode;
use crate::services::backup::{write_with_backup, ContentWriter};
use crate::transform::{consolidate_text, Framework};

/// Outcome of consolidating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    /// The file was rewritten (or would be, in a dry run).
    Updated { imports_added: Vec<Framework>, functions_removed: usize },
    /// The file already sources what it needs and defines none of it locally.
    Unchanged,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUpdate {
    pub path: String,
    pub status: UpdateStatus,
}

/// Tallies for one consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidationSummary {
    /// Shell files found under the root.
    pub scanned: usize,
    /// Files mentioning at least one framework function, plus unreadable ones.
    pub candidates: usize,
    pub files_updated: usize,
    /// Imports inserted plus local definitions removed, across all files.
    pub changes_made: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub files: Vec<FileUpdate>,
}

impl ConsolidationSummary {
    fn record(&mut self, entry: FileUpdate) {
        match &entry.status {
            UpdateStatus::Updated { imports_added, functions_removed } => {
                self.files_updated += 1;
                self.changes_made += imports_added.len() + functions_removed;
            }
            UpdateStatus::Unchanged => {}
            UpdateStatus::Failed { .. } => self.failed += 1,
        }
        self.files.push(entry);
    }
}

/// Frameworks that apply to `path`: a framework's own source file is never
/// rewritten to source itself.
pub fn frameworks_for(path: &Path) -> Vec<Framework> {
    Framework::ALL.into_iter().filter(|fw| !fw.is_provided_by(path)).collect()
}

/// Consolidate one file against the shared frameworks.
pub fn consolidate_file(
    path: &Path,
    mode: BraceMode,
    writer: &dyn ContentWriter,
    dry_run: bool,
) -> UpdateStatus {
    let source = match SourceFile::load(path) {
        Ok(s) => s,
        Err(err) => return UpdateStatus::Failed { reason: err.to_string() },
    };

    let result = consolidate_text(&source.content, &frameworks_for(path), mode);
    if !result.changed {
        debug!(path = %path.display(), "nothing to consolidate");
        return UpdateStatus::Unchanged;
    }

    let status = UpdateStatus::Updated {
        imports_added: result.imports_added,
        functions_removed: result.functions_removed,
    };
    if dry_run {
        return status;
    }

    match write_with_backup(path, &result.content, writer) {
        Ok(()) => status,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "consolidation write failed");
            UpdateStatus::Failed { reason: err.to_string() }
        }
    }
}

/// Shell files under `root` that mention a function of any framework that
/// applies to them, plus the number of shell files scanned.
///
/// Unreadable files are returned as candidates so the failure is reported.
pub fn consolidation_candidates(root: &Path) -> TidyResult<(usize, Vec<DiscoveredFile>)> {
    let files = find_shell_files(root)?;
    let scanned = files.len();
    let candidates = files
        .into_iter()
        .filter(|file| match SourceFile::load(&file.path) {
            Ok(source) => {
                frameworks_for(&file.path).iter().any(|fw| fw.is_needed_by(&source.content))
            }
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "cannot read file");
                true
            }
        })
        .collect();
    Ok((scanned, candidates))
}

/// Consolidate every candidate file under `root`, reporting each through `on_file`.
pub fn run_consolidation<F>(
    root: &Path,
    config: &ConsolidationConfig,
    writer: &dyn ContentWriter,
    dry_run: bool,
    mut on_file: F,
) -> TidyResult<ConsolidationSummary>
where
    F: FnMut(&FileUpdate),
{
    let (scanned, candidates) = consolidation_candidates(root)?;
    let mut summary = ConsolidationSummary {
        scanned,
        candidates: candidates.len(),
        dry_run,
        ..ConsolidationSummary::default()
    };

    for file in &candidates {
        let status = consolidate_file(&file.path, config.brace_mode, writer, dry_run);
        let entry = FileUpdate { path: file.relative_path.clone(), status };
        on_file(&entry);
        summary.record(entry);
    }

    Ok(summary)
}
