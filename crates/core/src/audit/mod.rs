//! Read-only audit of a shell-script tree.
//!
//! The auditor discovers every `*.sh` file once, reads each file once, and
//! then runs independent checks over that snapshot. Each check appends to a
//! [`Findings`] accumulator; the order of checks is fixed so reports are
//! deterministic:
//!
//! 1. duplicate files (content hash)
//! 2. empty directories
//! 3. large files
//! 4. duplicate functions
//! 5. misplaced files
//! 6. naming inconsistencies
//! 7. unused files
//! 8. complexity and comment density
//!
//! The misplaced-file and unused-file checks are heuristics. In particular a
//! file counts as "referenced" when its name shows up in the concatenated
//! text of all scanned files; a coincidental mention hides a dead file and a
//! file sourced through a computed path is reported as unused.

pub mod report;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AuditConfig;
use crate::discovery::{find_directories, find_shell_files, relative_display, DiscoveredFile};
use crate::error::TidyResult;
use crate::model::{sha256_hex, FunctionRegistry, Issue, IssueCategory, Severity, SourceFile};
use crate::scan::function_names;

pub use report::{render_report, AuditReport, SeverityCounts};

/// A discovered shell file together with what could be read from it.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub file: DiscoveredFile,
    /// Content decoded lossily; `None` when the file could not be read.
    pub source: Option<SourceFile>,
    /// SHA-256 of the raw bytes.
    pub hash: Option<String>,
    pub read_error: Option<String>,
}

impl ScannedFile {
    fn load(file: DiscoveredFile) -> Self {
        match fs::read(&file.path) {
            Ok(bytes) => {
                let hash = sha256_hex(&bytes);
                let content = String::from_utf8_lossy(&bytes).into_owned();
                let source = SourceFile::new(&file.path, content);
                Self { file, source: Some(source), hash: Some(hash), read_error: None }
            }
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "cannot read file");
                Self { file, source: None, hash: None, read_error: Some(err.to_string()) }
            }
        }
    }

    fn content(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.content.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeFile {
    pub path: String,
    pub bytes: u64,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateFunction {
    pub name: String,
    pub files: Vec<String>,
}

/// Accumulator the checks write into.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub issues: Vec<Issue>,
    pub redundant_files: Vec<String>,
    pub empty_dirs: Vec<String>,
    pub large_files: Vec<LargeFile>,
    pub duplicate_functions: Vec<DuplicateFunction>,
    pub unused_files: Vec<String>,
}

impl Findings {
    pub fn log(
        &mut self,
        severity: Severity,
        category: IssueCategory,
        file: &str,
        description: impl Into<String>,
    ) {
        self.issues.push(Issue::new(severity, category, file, description));
    }
}

/// Line statistics used by the complexity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStats {
    pub total: usize,
    pub code: usize,
    pub comments: usize,
}

impl LineStats {
    pub fn of(content: &str) -> Self {
        let mut stats = LineStats { total: 0, code: 0, comments: 0 };
        for line in content.lines() {
            stats.total += 1;
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                stats.comments += 1;
            } else if !trimmed.is_empty() {
                stats.code += 1;
            }
        }
        stats
    }
}

/// Snapshot of a tree plus the thresholds to audit it against.
#[derive(Debug, Clone)]
pub struct Auditor {
    root: PathBuf,
    config: AuditConfig,
    files: Vec<ScannedFile>,
}

impl Auditor {
    /// Discover and read every shell file under `root`.
    pub fn new(root: &Path, config: AuditConfig) -> TidyResult<Self> {
        let files = find_shell_files(root)?.into_iter().map(ScannedFile::load).collect();
        Ok(Self { root: root.to_path_buf(), config, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[ScannedFile] {
        &self.files
    }

    /// Run every check in order and roll the findings into a report.
    pub fn run(&self) -> AuditReport {
        let mut findings = Findings::default();
        self.check_duplicate_files(&mut findings);
        self.check_empty_directories(&mut findings);
        self.check_large_files(&mut findings);
        self.check_duplicate_functions(&mut findings);
        self.check_file_organization(&mut findings);
        self.check_naming_conventions(&mut findings);
        self.check_unused_files(&mut findings);
        self.check_complexity(&mut findings);
        AuditReport::new(&self.root, self.files.len(), findings)
    }

    /// Group files by content hash; every member after the first is redundant.
    pub fn check_duplicate_files(&self, findings: &mut Findings) {
        debug!("checking for duplicate files");
        let mut groups: Vec<Vec<&str>> = Vec::new();
        let mut by_hash: HashMap<&str, usize> = HashMap::new();

        for scanned in &self.files {
            let path = scanned.file.relative_path.as_str();
            let Some(hash) = scanned.hash.as_deref() else {
                let reason = scanned.read_error.as_deref().unwrap_or("unknown error");
                findings.log(
                    Severity::Low,
                    IssueCategory::FileAccess,
                    path,
                    format!("Cannot read file: {reason}"),
                );
                continue;
            };
            match by_hash.get(hash) {
                Some(&index) => groups[index].push(path),
                None => {
                    by_hash.insert(hash, groups.len());
                    groups.push(vec![path]);
                }
            }
        }

        for group in groups.into_iter().filter(|g| g.len() > 1) {
            findings.redundant_files.extend(group[1..].iter().map(|p| p.to_string()));
            findings.log(
                Severity::Medium,
                IssueCategory::DuplicateFiles,
                group[0],
                format!("Duplicate files found: {}", group.join(", ")),
            );
        }
    }

    /// Directories with no entries at all, except conventional placeholders.
    pub fn check_empty_directories(&self, findings: &mut Findings) {
        debug!("checking for empty directories");
        let dirs = match find_directories(&self.root) {
            Ok(d) => d,
            Err(err) => {
                warn!(error = %err, "cannot list directories");
                return;
            }
        };

        for dir in dirs {
            let name = dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            if self.config.skip_dirs.iter().any(|skip| *skip == name) {
                continue;
            }
            let is_empty = match fs::read_dir(&dir) {
                Ok(mut entries) => entries.next().is_none(),
                Err(_) => continue,
            };
            if is_empty {
                let rel = relative_display(&self.root, &dir);
                findings.log(Severity::Low, IssueCategory::EmptyDir, &rel, "Empty directory");
                findings.empty_dirs.push(rel);
            }
        }
    }

    /// Files above the configured byte size.
    pub fn check_large_files(&self, findings: &mut Findings) {
        debug!("checking for large files");
        for scanned in &self.files {
            let path = scanned.file.relative_path.as_str();
            let bytes = match fs::metadata(&scanned.file.path) {
                Ok(meta) => meta.len(),
                Err(err) => {
                    findings.log(
                        Severity::Low,
                        IssueCategory::FileAccess,
                        path,
                        format!("Cannot analyze file: {err}"),
                    );
                    continue;
                }
            };
            if bytes <= self.config.large_file_bytes {
                continue;
            }
            let lines = scanned.source.as_ref().map(SourceFile::line_count).unwrap_or(0);
            findings.log(
                Severity::Medium,
                IssueCategory::LargeFile,
                path,
                format!("Large file: {lines} lines"),
            );
            findings.large_files.push(LargeFile { path: path.to_string(), bytes, lines });
        }
    }

    /// Build the function registry for the tree.
    pub fn function_registry(&self) -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        for scanned in &self.files {
            let Some(content) = scanned.content() else { continue };
            for name in function_names(content) {
                registry.record(name, Path::new(&scanned.file.relative_path));
            }
        }
        registry
    }

    /// Function names defined in two or more distinct files.
    pub fn check_duplicate_functions(&self, findings: &mut Findings) {
        debug!("checking for duplicate functions");
        let registry = self.function_registry();
        for (name, files) in registry.duplicates() {
            let files: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
            findings.log(
                Severity::Medium,
                IssueCategory::DuplicateFunction,
                &files[0],
                format!("Function '{name}' defined in multiple files: {}", files.join(", ")),
            );
            findings.duplicate_functions.push(DuplicateFunction { name: name.to_string(), files });
        }
    }

    /// Keyword-in-filename versus directory mismatches.
    pub fn check_file_organization(&self, findings: &mut Findings) {
        debug!("checking file organization");
        for scanned in &self.files {
            let path = scanned.file.relative_path.as_str();
            let name = scanned.file.file_name().to_lowercase();

            if name.contains("test") && !path.contains("tests") {
                findings.log(
                    Severity::Low,
                    IssueCategory::MisplacedFile,
                    path,
                    "Test file not in tests directory",
                );
            }
            if name.contains("util") && !path.contains("utils") {
                findings.log(
                    Severity::Low,
                    IssueCategory::MisplacedFile,
                    path,
                    "Utility file not in utils directory",
                );
            }
            if name.contains("plugin") && !path.contains("plugins") && !path.contains("core") {
                findings.log(
                    Severity::Low,
                    IssueCategory::MisplacedFile,
                    path,
                    "Plugin file not in plugins directory",
                );
            }
        }
    }

    pub fn check_naming_conventions(&self, findings: &mut Findings) {
        debug!("checking naming conventions");
        for scanned in &self.files {
            let path = scanned.file.relative_path.as_str();
            let name = scanned.file.file_name();

            if name.contains('_') && name.contains('-') {
                findings.log(
                    Severity::Low,
                    IssueCategory::NamingInconsistency,
                    path,
                    "Mixed underscore and hyphen in filename",
                );
            }
            if name.chars().any(char::is_uppercase) {
                findings.log(
                    Severity::Low,
                    IssueCategory::NamingInconsistency,
                    path,
                    "Uppercase characters in filename",
                );
            }
        }
    }

    /// Files that no scanned file appears to source or mention.
    pub fn check_unused_files(&self, findings: &mut Findings) {
        debug!("checking for unused files");
        let mut corpus = String::new();
        for content in self.files.iter().filter_map(ScannedFile::content) {
            corpus.push_str(content);
            corpus.push('\n');
        }

        for scanned in &self.files {
            let file_name = scanned.file.file_name();
            if self.config.entry_points.iter().any(|entry| *entry == file_name) {
                continue;
            }
            let referenced = match reference_regex(&file_name, &scanned.file.file_stem()) {
                Ok(re) => re.is_match(&corpus),
                Err(err) => {
                    warn!(file = %file_name, error = %err, "cannot build reference pattern");
                    true
                }
            };
            if referenced || is_executable(&scanned.file.path) {
                continue;
            }

            let path = scanned.file.relative_path.as_str();
            findings.log(Severity::Medium, IssueCategory::UnusedFile, path, "File appears to be unused");
            findings.unused_files.push(path.to_string());
        }
    }

    /// Code-line thresholds and comment density.
    pub fn check_complexity(&self, findings: &mut Findings) {
        debug!("analyzing file complexity");
        for scanned in &self.files {
            let Some(content) = scanned.content() else { continue };
            let path = scanned.file.relative_path.as_str();
            let stats = LineStats::of(content);

            if stats.code > self.config.complexity_high {
                findings.log(
                    Severity::High,
                    IssueCategory::ComplexFile,
                    path,
                    format!("High complexity: {} code lines", stats.code),
                );
            } else if stats.code > self.config.complexity_medium {
                findings.log(
                    Severity::Medium,
                    IssueCategory::ComplexFile,
                    path,
                    format!("Medium complexity: {} code lines", stats.code),
                );
            }

            if stats.total > self.config.documentation_min_lines {
                let ratio = stats.comments as f64 / stats.total as f64;
                if ratio < self.config.documentation_min_ratio {
                    findings.log(
                        Severity::Low,
                        IssueCategory::LowDocumentation,
                        path,
                        format!("Low comment ratio: {}/{}", stats.comments, stats.total),
                    );
                }
            }
        }
    }
}

/// Case-insensitive pattern deciding whether a file is referenced.
///
/// Matches `source ... <name>`, `source ... <stem>`, `. ... <name>` and
/// `<stem>.sh` within a single line of the corpus.
pub fn reference_regex(file_name: &str, stem: &str) -> Result<Regex, regex::Error> {
    let name = regex::escape(file_name);
    let stem = regex::escape(stem);
    RegexBuilder::new(&format!(r"source.*{name}|source.*{stem}|\..*{name}|{stem}\.sh"))
        .case_insensitive(true)
        .build()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).map(|m| m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}

/// Discover, read and audit the tree under `root`.
pub fn run_audit(root: &Path, config: AuditConfig) -> TidyResult<AuditReport> {
    Ok(Auditor::new(root, config)?.run())
}
