use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::MigrationConfig;
use crate::discovery::{find_matching_files, DiscoveredFile};
use crate::error::TidyResult;
use crate::model::SourceFile;
use crate::services::backup::{write_with_backup, ContentWriter};
use crate::transform::{count_legacy_blocks, migrate_text, needs_migration};

/// Outcome of migrating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MigrationStatus {
    /// Legacy blocks were replaced (or would be, in a dry run).
    Migrated { blocks: usize },
    /// The file references the legacy bootstrap but no full block matched.
    Unchanged,
    /// Reading or writing failed; the file was left as it was.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMigration {
    pub path: String,
    pub status: MigrationStatus,
}

/// Tallies for one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    /// Shell files matched by the discovery patterns.
    pub checked: usize,
    /// Files referencing the legacy bootstrap path.
    pub candidates: usize,
    pub migrated: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub files: Vec<FileMigration>,
}

impl MigrationSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, entry: FileMigration) {
        match entry.status {
            MigrationStatus::Migrated { .. } => self.migrated += 1,
            MigrationStatus::Unchanged => self.unchanged += 1,
            MigrationStatus::Failed { .. } => self.failed += 1,
        }
        self.files.push(entry);
    }
}

/// Replace the legacy bootstrap blocks of one file already known to need it.
pub fn migrate_file(path: &Path, writer: &dyn ContentWriter, dry_run: bool) -> MigrationStatus {
    let source = match SourceFile::load(path) {
        Ok(s) => s,
        Err(err) => return MigrationStatus::Failed { reason: err.to_string() },
    };

    let Some(migrated) = migrate_text(&source.content) else {
        debug!(path = %path.display(), "no legacy bootstrap block matched");
        return MigrationStatus::Unchanged;
    };
    let blocks = count_legacy_blocks(&source.content);

    if dry_run {
        return MigrationStatus::Migrated { blocks };
    }

    match write_with_backup(path, &migrated, writer) {
        Ok(()) => MigrationStatus::Migrated { blocks },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "migration write failed");
            MigrationStatus::Failed { reason: err.to_string() }
        }
    }
}

/// Files under `root` matching the configured patterns that reference the
/// legacy bootstrap, plus the total number of files checked.
///
/// Unreadable files are returned as candidates so the failure is reported.
pub fn migration_candidates(
    root: &Path,
    config: &MigrationConfig,
) -> TidyResult<(usize, Vec<DiscoveredFile>)> {
    let files = find_matching_files(root, &config.patterns)?;
    let checked = files.len();
    let candidates = files
        .into_iter()
        .filter(|file| match SourceFile::load(&file.path) {
            Ok(source) => needs_migration(&source.content),
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "cannot read file");
                true
            }
        })
        .collect();
    Ok((checked, candidates))
}

/// Migrate every candidate file under `root`.
///
/// `on_file` is called after each file so callers can report progress. A
/// failing file never stops the run.
pub fn run_migration<F>(
    root: &Path,
    config: &MigrationConfig,
    writer: &dyn ContentWriter,
    dry_run: bool,
    mut on_file: F,
) -> TidyResult<MigrationSummary>
where
    F: FnMut(&FileMigration),
{
    let (checked, candidates) = migration_candidates(root, config)?;
    let mut summary = MigrationSummary {
        checked,
        candidates: candidates.len(),
        dry_run,
        ..MigrationSummary::default()
    };

    for file in &candidates {
        let status = migrate_file(&file.path, writer, dry_run);
        let entry = FileMigration { path: file.relative_path.clone(), status };
        on_file(&entry);
        summary.record(entry);
    }

    Ok(summary)
}
