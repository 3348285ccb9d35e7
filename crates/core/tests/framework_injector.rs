use std::path::Path;

use shtidy_core::scan::BraceMode;
use shtidy_core::services::frameworks_for;
use shtidy_core::transform::{
    add_framework_import, consolidate_text, find_injection_point, Framework, CANONICAL_BOOTSTRAP,
};

const HEAD: &str = "\
#!/usr/bin/env bash
# Load ServerSentry environment
if [[ -z \"${SERVERSENTRY_ENV_LOADED:-}\" ]]; then
  source \"${SERVERSENTRY_ROOT}/lib/serversentry-bootstrap.sh\"
fi";

fn test_script() -> String {
    format!("{HEAD}\n\ntest_pass() {{\n  echo \"PASS: $1\"\n}}\n\ntest_pass \"works\"\n")
}

#[test]
fn injection_point_follows_the_bootstrap_fi() {
    let text = test_script();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(find_injection_point(&lines), 5);
}

#[test]
fn injection_point_falls_back_to_top() {
    assert_eq!(find_injection_point(&["echo hi", "fi"]), 0);

    // Marker present but nothing before the `fi` mentions bootstrap.
    let lines = ["if [[ -z \"${SERVERSENTRY_ENV_LOADED:-}\" ]]; then", "  export X=1", "fi"];
    assert_eq!(find_injection_point(&lines), 0);
}

#[test]
fn injection_point_skips_fi_lines_before_bootstrap_is_mentioned() {
    let lines = [
        "if [[ -z \"${SERVERSENTRY_ENV_LOADED:-}\" ]]; then",
        "  if true; then",
        "  fi",
        "  echo boot",
        "strap",
        "fi",
        "echo after",
    ];
    // Lines are joined without a separator, so "boot" + "strap" counts.
    assert_eq!(find_injection_point(&lines), 6);
}

#[test]
fn indented_fi_never_anchors_the_import() {
    let lines = [
        "if [[ -z \"${SERVERSENTRY_ENV_LOADED:-}\" ]]; then",
        "  # bootstrap",
        "  if true; then",
        "  fi",
        "fi  ",
        "echo after",
    ];
    assert_eq!(find_injection_point(&lines), 5);
}

#[test]
fn import_lands_after_the_canonical_bootstrap_block() {
    let input = format!("#!/usr/bin/env bash\n{CANONICAL_BOOTSTRAP}\n\nprint_success done\n");
    let result = consolidate_text(&input, &Framework::ALL, BraceMode::QuoteAware);

    assert_eq!(result.imports_added, vec![Framework::Ui]);
    let expected = format!(
        "#!/usr/bin/env bash\n{CANONICAL_BOOTSTRAP}\n{}\n\nprint_success done\n",
        Framework::Ui.import_block()
    );
    assert_eq!(result.content, expected);

    let loop_end = result.content.find("  done\n").expect("while loop");
    let import_at = result.content.find("# Load unified UI framework").expect("ui import");
    assert!(import_at > loop_end, "import must not sit inside the bootstrap loop");
}

#[test]
fn import_block_is_surrounded_by_blank_lines() {
    let out = add_framework_import("echo hi", Framework::Ui);
    let expected = concat!(
        "\n# Load unified UI framework\n",
        "if [[ -f \"${SERVERSENTRY_ROOT}/lib/ui/common/print_utils.sh\" ]]; then\n",
        "  source \"${SERVERSENTRY_ROOT}/lib/ui/common/print_utils.sh\"\n",
        "fi\n",
        "\necho hi",
    );
    assert_eq!(out, expected);
}

#[test]
fn consolidation_imports_once_and_strips_local_copies() {
    let input = test_script();
    let result = consolidate_text(&input, &Framework::ALL, BraceMode::QuoteAware);

    let expected = format!("{HEAD}\n{}\n\n\ntest_pass \"works\"\n", Framework::Test.import_block());
    assert_eq!(result.content, expected);
    assert_eq!(result.imports_added, vec![Framework::Test]);
    assert_eq!(result.frameworks_needed, vec![Framework::Test]);
    assert_eq!(result.functions_removed, 1);
    assert!(result.changed);
}

#[test]
fn consolidation_is_a_no_op_on_its_own_output() {
    let first = consolidate_text(&test_script(), &Framework::ALL, BraceMode::QuoteAware);
    let second = consolidate_text(&first.content, &Framework::ALL, BraceMode::QuoteAware);
    assert!(!second.changed);
    assert_eq!(second.content, first.content);
    assert!(second.imports_added.is_empty());
    assert_eq!(second.functions_removed, 0);
}

#[test]
fn already_imported_file_only_loses_local_definitions() {
    let input = "source \"$ROOT/lib/ui/common/print_utils.sh\"\nprint_success() {\n  echo ok\n}\nprint_success done\n";
    let result = consolidate_text(input, &[Framework::Ui], BraceMode::QuoteAware);
    assert!(result.imports_added.is_empty());
    assert_eq!(result.content, "source \"$ROOT/lib/ui/common/print_utils.sh\"\nprint_success done\n");
}

#[test]
fn ui_decision_sees_the_text_after_the_test_step() {
    let input = "print_header() {\n  echo '== header =='\n}\nassert true\nprint_header\n";
    let result = consolidate_text(input, &Framework::ALL, BraceMode::QuoteAware);
    assert_eq!(result.imports_added, vec![Framework::Test, Framework::Ui]);
    assert_eq!(result.functions_removed, 1);

    let test_at = result.content.find("test_framework_core.sh").expect("test import");
    let ui_at = result.content.find("print_utils.sh").expect("ui import");
    assert!(ui_at < test_at, "both inserted at the top, UI last so it ends up first");
    assert!(!result.content.contains("print_header() {"));
}

#[test]
fn unrelated_file_is_unchanged() {
    let input = "#!/usr/bin/env bash\necho nothing to see\n";
    let result = consolidate_text(input, &Framework::ALL, BraceMode::QuoteAware);
    assert!(!result.changed);
    assert!(result.frameworks_needed.is_empty());
    assert_eq!(result.content, input);
}

#[test]
fn framework_source_files_are_not_consolidated_against_themselves() {
    let fws = frameworks_for(Path::new("/srv/app/tests/lib/test_framework_core.sh"));
    assert_eq!(fws, vec![Framework::Ui]);

    let fws = frameworks_for(Path::new("/srv/app/lib/ui/common/print_utils.sh"));
    assert_eq!(fws, vec![Framework::Test]);

    let fws = frameworks_for(Path::new("/srv/app/lib/core/logging.sh"));
    assert_eq!(fws, vec![Framework::Test, Framework::Ui]);
}
