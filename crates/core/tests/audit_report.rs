use std::path::Path;

use shtidy_core::audit::{render_report, AuditReport, Findings};
use shtidy_core::model::{IssueCategory, Severity};

fn sample_findings() -> Findings {
    let mut findings = Findings::default();
    findings.log(
        Severity::Low,
        IssueCategory::NamingInconsistency,
        "lib/A.sh",
        "Uppercase characters in filename",
    );
    findings.log(
        Severity::Medium,
        IssueCategory::UnusedFile,
        "lib/old.sh",
        "File appears to be unused",
    );
    findings.log(
        Severity::High,
        IssueCategory::ComplexFile,
        "lib/big.sh",
        "High complexity: 400 code lines",
    );
    findings.log(
        Severity::Medium,
        IssueCategory::DuplicateFiles,
        "lib/a.sh",
        "Duplicate files found: lib/a.sh, lib/b.sh",
    );
    findings.log(
        Severity::Low,
        IssueCategory::LowDocumentation,
        "lib/big.sh",
        "Low comment ratio: 0/420",
    );
    findings.redundant_files = (1..=7).map(|n| format!("lib/copy{n}.sh")).collect();
    findings.unused_files = vec!["lib/old.sh".to_string()];
    findings
}

#[test]
fn counts_and_attention_are_derived_from_issues() {
    let report = AuditReport::new(Path::new("/srv/app"), 12, sample_findings());

    assert_eq!(report.total_issues, 5);
    assert_eq!(report.severity_counts.high, 1);
    assert_eq!(report.severity_counts.medium, 2);
    assert_eq!(report.severity_counts.low, 2);
    assert_eq!(report.files_needing_attention(), 4);
    assert!(!report.is_clean());
}

#[test]
fn issues_sort_by_severity_then_category_name() {
    let report = AuditReport::new(Path::new("/srv/app"), 12, sample_findings());
    let order: Vec<(Severity, IssueCategory)> =
        report.sorted_issues().into_iter().map(|i| (i.severity, i.category)).collect();
    assert_eq!(
        order,
        vec![
            (Severity::High, IssueCategory::ComplexFile),
            (Severity::Medium, IssueCategory::DuplicateFiles),
            (Severity::Medium, IssueCategory::UnusedFile),
            (Severity::Low, IssueCategory::LowDocumentation),
            (Severity::Low, IssueCategory::NamingInconsistency),
        ]
    );
}

#[test]
fn rendered_report_has_every_section() {
    let report = AuditReport::new(Path::new("/srv/app"), 12, sample_findings());
    let text = render_report(&report);

    assert!(text.contains("📋 AUDIT REPORT"));
    assert!(text.contains("  HIGH: 1 issues"));
    assert!(text.contains("  MEDIUM: 2 issues"));
    assert!(text.contains("  [HIGH] COMPLEX_FILE: lib/big.sh\n    High complexity: 400 code lines"));
    assert!(text.contains("📄 Remove duplicate files (7):"));
    assert!(text.contains("    - lib/copy5.sh\n    ... and 2 more"));
    assert!(!text.contains("lib/copy6.sh"));
    assert!(!text.contains("Remove empty directories"), "empty sections are omitted");
    assert!(text.contains("  Total shell files: 12"));
    assert!(text.contains("  Files needing attention: 4"));

    let high_at = text.find("[HIGH]").expect("high issue");
    let low_at = text.find("[LOW]").expect("low issue");
    assert!(high_at < low_at);
}

#[test]
fn json_uses_uppercase_severity_keys() {
    let report = AuditReport::new(Path::new("/srv/app"), 0, Findings::default());
    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["severity_counts"]["HIGH"], 0);
    assert_eq!(json["total_issues"], 0);
    assert!(json["generated_at"].as_str().is_some_and(|s| !s.is_empty()));
}
