//! Core data model shared by the transformers and the audit scanner.
//!
//! - `SourceFile`: a shell script loaded into memory.
//! - `FunctionDefinition`: a named, line-delimited region of a source file.
//! - `FunctionRegistry`: which files define which function names.
//! - `Issue` with its `Severity` and `IssueCategory`: a single audit finding.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{TidyError, TidyResult};

/// A shell script held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    /// Read a file that must be valid UTF-8.
    ///
    /// Used by the mutating operations, which must never rewrite a file they
    /// could only partially decode.
    pub fn load(path: impl AsRef<Path>) -> TidyResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| TidyError::io(path, e))?;
        Ok(Self::new(path, content))
    }

    /// Read a file, replacing invalid UTF-8 sequences.
    ///
    /// Used by the read-only audit, where a best-effort view is enough.
    pub fn load_lossy(path: impl AsRef<Path>) -> TidyResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| TidyError::io(path, e))?;
        Ok(Self::new(path, String::from_utf8_lossy(&bytes).into_owned()))
    }

    pub fn byte_len(&self) -> usize {
        self.content.len()
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// SHA-256 of the content as a lowercase hex string.
    pub fn content_hash(&self) -> String {
        sha256_hex(self.content.as_bytes())
    }
}

/// SHA-256 digest of `bytes` as a lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// A function body located inside a source file.
///
/// Line indices are zero-based and inclusive; `end_line >= start_line` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub file: PathBuf,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl FunctionDefinition {
    /// Number of lines spanned, header and closing brace included.
    pub fn line_span(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Maps function names to the files that define them.
///
/// Files are de-duplicated per name and kept in the order they were recorded;
/// names are reported in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    order: Vec<String>,
    files: HashMap<String, Vec<PathBuf>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` defines `name`. Recording the same pair twice is a no-op.
    pub fn record(&mut self, name: &str, path: &Path) {
        match self.files.get_mut(name) {
            Some(paths) => {
                if !paths.iter().any(|p| p == path) {
                    paths.push(path.to_path_buf());
                }
            }
            None => {
                self.order.push(name.to_string());
                self.files.insert(name.to_string(), vec![path.to_path_buf()]);
            }
        }
    }

    pub fn files_for(&self, name: &str) -> &[PathBuf] {
        self.files.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Names defined in more than one file, with their files, in first-seen order.
    pub fn duplicates(&self) -> Vec<(&str, &[PathBuf])> {
        self.order
            .iter()
            .filter_map(|name| {
                let files = self.files_for(name);
                (files.len() > 1).then_some((name.as_str(), files))
            })
            .collect()
    }
}

/// Severity of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Report order: most severe first.
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }

    /// Sort key placing HIGH before MEDIUM before LOW.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of problem an audit finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCategory {
    FileAccess,
    DuplicateFiles,
    EmptyDir,
    LargeFile,
    DuplicateFunction,
    MisplacedFile,
    NamingInconsistency,
    UnusedFile,
    ComplexFile,
    LowDocumentation,
}

impl IssueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::FileAccess => "FILE_ACCESS",
            IssueCategory::DuplicateFiles => "DUPLICATE_FILES",
            IssueCategory::EmptyDir => "EMPTY_DIR",
            IssueCategory::LargeFile => "LARGE_FILE",
            IssueCategory::DuplicateFunction => "DUPLICATE_FUNCTION",
            IssueCategory::MisplacedFile => "MISPLACED_FILE",
            IssueCategory::NamingInconsistency => "NAMING_INCONSISTENCY",
            IssueCategory::UnusedFile => "UNUSED_FILE",
            IssueCategory::ComplexFile => "COMPLEX_FILE",
            IssueCategory::LowDocumentation => "LOW_DOCUMENTATION",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit finding. Issues are never merged or de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub file: String,
    pub description: String,
}

impl Issue {
    pub fn new(
        severity: Severity,
        category: IssueCategory,
        file: impl AsRef<Path>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            file: file.as_ref().display().to_string(),
            description: description.into(),
        }
    }
}
