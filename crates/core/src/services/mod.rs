//! File-level drivers around the pure transformations: load, transform,
//! write back with a backup, and tally the outcome per file.

pub mod backup;
pub mod cleanup;
pub mod consolidation;
pub mod migration;

pub use backup::{backup_path, write_with_backup, Backup, ContentWriter, FsWriter};
pub use cleanup::{cleanup_commands_file, CleanupStatus};
pub use consolidation::{
    consolidate_file, consolidation_candidates, frameworks_for, run_consolidation,
    ConsolidationSummary, FileUpdate, UpdateStatus,
};
pub use migration::{
    migrate_file, migration_candidates, run_migration, FileMigration, MigrationStatus,
    MigrationSummary,
};
