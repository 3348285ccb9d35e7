use std::fs;
use std::path::Path;

use shtidy::commands::{
    audit_command, cleanup_commands_command, consolidate_command, load_config,
    migrate_bootstrap_command, show_config_command,
};
use tempfile::tempdir;

fn write_file(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create parent dirs");
    fs::write(path, body).expect("write fixture");
}

fn root_str(path: &Path) -> &str {
    path.to_str().expect("utf8 temp path")
}

#[test]
fn load_config_prefers_explicit_path() {
    let dir = tempdir().expect("tempdir");
    let explicit = dir.path().join("alt.json");
    fs::write(&explicit, r#"{"audit": {"large_file_bytes": 10}}"#).expect("write config");

    let (root, config) =
        load_config(root_str(dir.path()), Some(root_str(&explicit))).expect("load config");
    assert_eq!(root, dir.path().canonicalize().expect("canon"));
    assert_eq!(config.audit.large_file_bytes, 10);
}

#[test]
fn audit_command_flags_large_files_from_config() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join(".shtidy.json"), r#"{"audit": {"large_file_bytes": 10}}"#)
        .expect("write config");
    write_file(dir.path(), "serversentry-env.sh", "# entry point with more than ten bytes\n");

    let clean = audit_command(root_str(dir.path()), None, true).expect("audit runs");
    assert!(!clean, "the entry point exceeds the configured size limit");
}

#[test]
fn migrate_command_with_nothing_to_do_succeeds() {
    let dir = tempdir().expect("tempdir");
    write_file(dir.path(), "lib/core/plain.sh", "echo plain\n");

    let ok = migrate_bootstrap_command(root_str(dir.path()), None, false, false).expect("migrate");
    assert!(ok);
}

#[test]
fn migrate_command_reports_unreadable_candidates_as_failures() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tests/binary.sh");
    fs::create_dir_all(path.parent().expect("parent")).expect("dirs");
    fs::write(&path, [0xff_u8, 0xfe, 0x00, 0x80]).expect("write invalid utf-8");

    let ok = migrate_bootstrap_command(root_str(dir.path()), None, false, true).expect("migrate");
    assert!(!ok);
    assert_eq!(fs::read(&path).expect("read"), vec![0xff_u8, 0xfe, 0x00, 0x80]);
}

#[test]
fn consolidate_command_always_succeeds() {
    let dir = tempdir().expect("tempdir");
    write_file(dir.path(), "tests/run.sh", "test_pass() {\n  :\n}\ntest_pass\n");

    assert!(consolidate_command(root_str(dir.path()), None, true, false).expect("dry run"));
    let untouched = fs::read_to_string(dir.path().join("tests/run.sh")).expect("read");
    assert!(untouched.contains("test_pass() {"));

    assert!(consolidate_command(root_str(dir.path()), None, false, true).expect("apply"));
    let after = fs::read_to_string(dir.path().join("tests/run.sh")).expect("read");
    assert!(after.contains("test_framework_core.sh"));
    assert!(!after.contains("test_pass() {"));
}

#[test]
fn cleanup_command_uses_configured_defaults() {
    let dir = tempdir().expect("tempdir");
    write_file(
        dir.path(),
        "lib/ui/cli/commands.sh",
        "# Command: template\ncmd_template() {\n  echo hi\n}\n",
    );

    let ok = cleanup_commands_command(root_str(dir.path()), None, None, &[], false)
        .expect("cleanup");
    assert!(ok);
    let after = fs::read_to_string(dir.path().join("lib/ui/cli/commands.sh")).expect("read");
    assert_eq!(after, "\n");
}

#[test]
fn show_config_command_accepts_defaults() {
    let dir = tempdir().expect("tempdir");
    show_config_command(root_str(dir.path()), None).expect("show config");
}
