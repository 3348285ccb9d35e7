use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::audit::{DuplicateFunction, Findings, LargeFile};
use crate::model::{Issue, Severity};

/// How many entries each cleanup recommendation lists before eliding.
const RECOMMENDATION_PREVIEW: usize = 5;

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    #[serde(rename = "HIGH")]
    pub high: usize,
    #[serde(rename = "MEDIUM")]
    pub medium: usize,
    #[serde(rename = "LOW")]
    pub low: usize,
}

impl SeverityCounts {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// Roll-up of one audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub root: String,
    pub generated_at: String,
    pub total_shell_files: usize,
    pub total_issues: usize,
    pub severity_counts: SeverityCounts,
    pub issues: Vec<Issue>,
    pub redundant_files: Vec<String>,
    pub empty_dirs: Vec<String>,
    pub unused_files: Vec<String>,
    pub large_files: Vec<LargeFile>,
    pub duplicate_functions: Vec<DuplicateFunction>,
}

impl AuditReport {
    pub fn new(root: &Path, total_shell_files: usize, findings: Findings) -> Self {
        Self {
            root: root.display().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            total_shell_files,
            total_issues: findings.issues.len(),
            severity_counts: SeverityCounts::from_issues(&findings.issues),
            issues: findings.issues,
            redundant_files: findings.redundant_files,
            empty_dirs: findings.empty_dirs,
            unused_files: findings.unused_files,
            large_files: findings.large_files,
            duplicate_functions: findings.duplicate_functions,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.total_issues == 0
    }

    /// Distinct files (or directories) mentioned by at least one issue.
    pub fn files_needing_attention(&self) -> usize {
        self.issues.iter().map(|i| i.file.as_str()).collect::<BTreeSet<_>>().len()
    }

    /// Issues ordered HIGH → LOW, then by category name; ties keep discovery order.
    pub fn sorted_issues(&self) -> Vec<&Issue> {
        let mut issues: Vec<&Issue> = self.issues.iter().collect();
        issues.sort_by_key(|i| (i.severity.rank(), i.category.as_str()));
        issues
    }
}

fn push_recommendation(out: &mut String, heading: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {heading} ({}):", entries.len());
    for entry in entries.iter().take(RECOMMENDATION_PREVIEW) {
        let _ = writeln!(out, "    - {entry}");
    }
    if entries.len() > RECOMMENDATION_PREVIEW {
        let _ = writeln!(out, "    ... and {} more", entries.len() - RECOMMENDATION_PREVIEW);
    }
}

/// Human-readable multi-section report.
pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "📋 AUDIT REPORT");
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "\n📊 Issues Summary:");
    for severity in Severity::ALL {
        let count = report.severity_counts.get(severity);
        if count > 0 {
            let _ = writeln!(out, "  {severity}: {count} issues");
        }
    }

    let _ = writeln!(out, "\n🔍 Detailed Issues:");
    for issue in report.sorted_issues() {
        let _ = writeln!(out, "  [{}] {}: {}", issue.severity, issue.category, issue.file);
        let _ = writeln!(out, "    {}", issue.description);
    }

    let _ = writeln!(out, "\n🧹 Cleanup Recommendations:");
    push_recommendation(&mut out, "📄 Remove duplicate files", &report.redundant_files);
    push_recommendation(&mut out, "📁 Remove empty directories", &report.empty_dirs);
    push_recommendation(&mut out, "🗑️  Consider removing unused files", &report.unused_files);

    let _ = writeln!(out, "\n📈 Project Statistics:");
    let _ = writeln!(out, "  Total shell files: {}", report.total_shell_files);
    let _ = writeln!(out, "  Issues found: {}", report.total_issues);
    let _ = writeln!(out, "  Files needing attention: {}", report.files_needing_attention());

    out
}
