use std::fs;
use std::io;
use std::path::Path;

use shtidy_core::config::ConsolidationConfig;
use shtidy_core::scan::BraceMode;
use shtidy_core::services::{
    backup_path, consolidate_file, run_consolidation, ContentWriter, FsWriter, UpdateStatus,
};
use shtidy_core::transform::Framework;
use tempfile::tempdir;

const CHECK_SCRIPT: &str = "\
print_success() {
  echo ok
}
test_pass() {
  :
}
print_success done
test_pass
";

/// Clobbers the target and then reports failure.
struct FailingWriter;

impl ContentWriter for FailingWriter {
    fn write(&self, path: &Path, _contents: &str) -> io::Result<()> {
        fs::write(path, "partial")?;
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

fn write_file(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create parent dirs");
    fs::write(path, body).expect("write fixture");
}

fn project(root: &Path) {
    write_file(root, "tests/unit/check.sh", CHECK_SCRIPT);
    write_file(root, "lib/core/plain.sh", "echo plain\n");
    write_file(root, "lib/core/already.sh", "source \"$ROOT/lib/ui/common/print_utils.sh\"\nprint_info hi\n");
    write_file(root, "lib/ui/common/print_utils.sh", "print_success() {\n  echo ok\n}\n");
}

#[test]
fn failed_write_restores_the_file_and_removes_the_backup() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("check.sh");
    fs::write(&path, CHECK_SCRIPT).expect("write fixture");

    let status = consolidate_file(&path, BraceMode::QuoteAware, &FailingWriter, false);

    assert!(matches!(status, UpdateStatus::Failed { ref reason } if reason.contains("disk full")));
    assert_eq!(fs::read_to_string(&path).expect("read"), CHECK_SCRIPT);
    assert!(!backup_path(&path).exists());
}

#[test]
fn dry_run_reports_the_update_without_writing() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("check.sh");
    fs::write(&path, CHECK_SCRIPT).expect("write fixture");

    let status = consolidate_file(&path, BraceMode::QuoteAware, &FailingWriter, true);

    assert_eq!(
        status,
        UpdateStatus::Updated {
            imports_added: vec![Framework::Test, Framework::Ui],
            functions_removed: 2,
        }
    );
    assert_eq!(fs::read_to_string(&path).expect("read"), CHECK_SCRIPT);
    assert!(!backup_path(&path).exists());
}

#[test]
fn run_tallies_candidates_updates_and_changes() {
    let dir = tempdir().expect("tempdir");
    project(dir.path());
    let config = ConsolidationConfig::default();

    let mut seen = Vec::new();
    let summary = run_consolidation(dir.path(), &config, &FsWriter, false, |entry| {
        seen.push(entry.path.clone())
    })
    .expect("consolidation runs");

    assert_eq!(summary.scanned, 4);
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.files_updated, 1);
    assert_eq!(summary.changes_made, 4, "two imports plus two removed definitions");
    assert_eq!(summary.failed, 0);
    assert_eq!(seen, vec!["lib/core/already.sh", "tests/unit/check.sh"]);

    let after = fs::read_to_string(dir.path().join("tests/unit/check.sh")).expect("read");
    assert!(after.contains("test_framework_core.sh"));
    assert!(after.contains("print_utils.sh"));
    assert!(!after.contains("print_success() {"));
    assert!(!after.contains("test_pass() {"));
    assert!(!backup_path(&dir.path().join("tests/unit/check.sh")).exists());

    let provider = fs::read_to_string(dir.path().join("lib/ui/common/print_utils.sh")).expect("read");
    assert_eq!(provider, "print_success() {\n  echo ok\n}\n");
}

#[test]
fn dry_run_over_a_tree_leaves_every_file_alone() {
    let dir = tempdir().expect("tempdir");
    project(dir.path());

    let summary =
        run_consolidation(dir.path(), &ConsolidationConfig::default(), &FsWriter, true, |_| {})
            .expect("consolidation runs");

    assert!(summary.dry_run);
    assert_eq!(summary.files_updated, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("tests/unit/check.sh")).expect("read"),
        CHECK_SCRIPT
    );
}

#[test]
fn unreadable_files_count_as_failures() {
    let dir = tempdir().expect("tempdir");
    project(dir.path());
    let binary = dir.path().join("lib/core/binary.sh");
    fs::write(&binary, [0xff_u8, 0xfe, 0x00, 0x80]).expect("write invalid utf-8");

    let summary =
        run_consolidation(dir.path(), &ConsolidationConfig::default(), &FsWriter, false, |_| {})
            .expect("consolidation runs");

    assert_eq!(summary.scanned, 5);
    assert_eq!(summary.candidates, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.files_updated, 1);
    let failed = summary
        .files
        .iter()
        .find(|entry| matches!(entry.status, UpdateStatus::Failed { .. }))
        .expect("failed entry");
    assert_eq!(failed.path, "lib/core/binary.sh");
    assert_eq!(fs::read(&binary).expect("read"), vec![0xff_u8, 0xfe, 0x00, 0x80]);
}
