//! Locating shell scripts under a project root.
//!
//! Two discovery modes exist:
//! - a recursive walk for every `*.sh` file (audit, consolidation), sorted by
//!   file name at every level so traversal order is deterministic;
//! - a fixed list of glob patterns relative to the root (bootstrap migration).
//!
//! Only regular files (or symlinks resolving to one) are returned.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{TidyError, TidyResult};

/// A shell script found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as reachable from the current directory (root-prefixed).
    pub path: PathBuf,
    /// Path relative to the root, with forward slashes.
    pub relative_path: String,
}

impl DiscoveredFile {
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let relative_path = relative_display(root, &path);
        Self { path, relative_path }
    }

    pub fn file_name(&self) -> String {
        self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }

    pub fn file_stem(&self) -> String {
        self.path.file_stem().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

/// `path` relative to `root` for display, falling back to the full path.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

fn is_shell_script(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("sh")
}

fn ensure_root(root: &Path) -> TidyResult<()> {
    if root.is_dir() {
        return Ok(());
    }
    Err(TidyError::io(
        root,
        std::io::Error::new(std::io::ErrorKind::NotFound, "root is not a directory"),
    ))
}

/// Every `*.sh` regular file below `root`, in sorted traversal order.
///
/// Entries that cannot be read are logged and skipped.
pub fn find_shell_files(root: &Path) -> TidyResult<Vec<DiscoveredFile>> {
    ensure_root(root)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !is_shell_script(path) || !path.is_file() {
            continue;
        }
        files.push(DiscoveredFile::new(root, path.to_path_buf()));
    }

    debug!(root = %root.display(), count = files.len(), "discovered shell files");
    Ok(files)
}

/// Every directory strictly below `root`, in sorted traversal order.
pub fn find_directories(root: &Path) -> TidyResult<Vec<PathBuf>> {
    ensure_root(root)?;

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(e) if e.file_type().is_dir() => dirs.push(e.into_path()),
            Ok(_) => {}
            Err(err) => warn!(error = %err, "skipping unreadable entry"),
        }
    }
    Ok(dirs)
}

/// Shell files matching any of `patterns` (globs relative to `root`).
///
/// Results follow pattern order, each pattern's matches sorted; a path
/// matched by several patterns is returned once.
pub fn find_matching_files(root: &Path, patterns: &[String]) -> TidyResult<Vec<DiscoveredFile>> {
    ensure_root(root)?;

    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let full = format!("{}/{}", escaped_root.trim_end_matches('/'), pattern);
        let paths = glob::glob(&full).map_err(|e| TidyError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

        for path in paths {
            let path = match path {
                Ok(p) => p,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable glob match");
                    continue;
                }
            };
            if !is_shell_script(&path) || !path.is_file() {
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(DiscoveredFile::new(root, path));
            }
        }
    }

    debug!(root = %root.display(), count = files.len(), "matched shell files");
    Ok(files)
}
