use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scan::BraceMode;
use crate::transform::{DEFAULT_COMMANDS_FILE, DEFAULT_EXTRACTED_COMMANDS};

/// Config file names looked up in the root when no explicit path is given.
pub const CONFIG_FILE_NAMES: &[&str] = &[".shtidy.json", ".shtidy.yaml", ".shtidy.yml"];

/// Glob patterns (relative to the root) scanned for legacy bootstrap blocks.
pub const DEFAULT_MIGRATION_PATTERNS: &[&str] = &[
    "lib/core/*.sh",
    "lib/core/*/*.sh",
    "lib/plugins/*/*.sh",
    "lib/plugins/*/*/*.sh",
    "lib/ui/*/*.sh",
    "lib/core/utils/*.sh",
    "tests/*.sh",
    "tests/*/*.sh",
    "tests/*/*/*.sh",
    "tools/*.sh",
    "tools/*/*.sh",
    "docs/*/*.sh",
    "example-script.sh",
];

/// Effective configuration for every operation.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShtidyConfig {
    pub audit: AuditConfig,
    pub migration: MigrationConfig,
    pub consolidation: ConsolidationConfig,
    pub cleanup: CleanupConfig,
}

/// Thresholds and heuristic lists used by the audit.
///
/// The numbers are hand-picked defaults, not invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuditConfig {
    /// Files larger than this many bytes are reported as large.
    pub large_file_bytes: u64,
    /// Code-line count above which a file is HIGH complexity.
    pub complexity_high: usize,
    /// Code-line count above which a file is MEDIUM complexity.
    pub complexity_medium: usize,
    /// Files with more total lines than this are checked for comment density.
    pub documentation_min_lines: usize,
    /// Minimum comment-line ratio before LOW_DOCUMENTATION is reported.
    pub documentation_min_ratio: f64,
    /// Directory names never reported as empty.
    pub skip_dirs: Vec<String>,
    /// File names that are never reported as unused.
    pub entry_points: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            large_file_bytes: 1024 * 1024,
            complexity_high: 300,
            complexity_medium: 200,
            documentation_min_lines: 50,
            documentation_min_ratio: 0.1,
            skip_dirs: [".git", ".vscode", ".cursor", "logs", "tmp", "data"]
                .into_iter()
                .map(String::from)
                .collect(),
            entry_points: vec!["serversentry-env.sh".to_string(), "serversentry".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MigrationConfig {
    pub patterns: Vec<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self { patterns: DEFAULT_MIGRATION_PATTERNS.iter().map(|p| p.to_string()).collect() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsolidationConfig {
    pub brace_mode: BraceMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CleanupConfig {
    /// Monolithic command file, relative to the root.
    pub commands_file: String,
    /// Command names whose `cmd_<name>` implementations were extracted.
    pub commands: Vec<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            commands_file: DEFAULT_COMMANDS_FILE.to_string(),
            commands: DEFAULT_EXTRACTED_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ShtidyConfig {
    /// Parse a config file, choosing JSON or YAML by extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&body)
                .with_context(|| format!("Failed to parse config JSON at {}", path.display()))?
        } else {
            serde_yaml::from_str(&body)
                .with_context(|| format!("Failed to parse config YAML at {}", path.display()))?
        };
        Ok(config)
    }

    /// Load the effective config for `root`.
    ///
    /// An explicit path must exist. Without one, the first of
    /// [`CONFIG_FILE_NAMES`] present in `root` is used, else the defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match find_config_file(root) {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// First config file present in `root`, if any.
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| root.join(name)).find(|path| path.is_file())
}
