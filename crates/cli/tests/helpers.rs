use std::fs;

use shtidy::canonicalize_or_current;
use shtidy::commands::dry_run_prefix;
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");

    std::env::set_current_dir(original).expect("restore cwd");
    assert_eq!(result, expected);
}

#[test]
fn canonicalize_or_current_resolves_existing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = canonicalize_or_current(subdir.to_str().expect("utf8 path")).expect("canonicalize");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn canonicalize_or_current_keeps_missing_relative_path() {
    let result = canonicalize_or_current("surely/not/here").expect("fallback");
    assert!(result.is_absolute());
    assert!(result.ends_with("surely/not/here"));
}

#[test]
fn dry_run_prefix_only_when_requested() {
    assert_eq!(dry_run_prefix(true), "(dry run) ");
    assert_eq!(dry_run_prefix(false), "");
}
