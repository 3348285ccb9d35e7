use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scan::{definitions_matching, BraceMode, ENV_SENTINEL};
use crate::transform::remover::remove_functions;

/// A shared shell library whose functions should be sourced, not redefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Test,
    Ui,
}

const TEST_FUNCTIONS: &[&str] = &[
    "test_pass",
    "test_fail",
    "assert",
    "setup_test_environment",
    "cleanup_test_environment",
    "create_test_config",
    "print_test_header",
    "start_timer",
    "end_timer",
    "assert_performance",
];

const UI_FUNCTIONS: &[&str] = &[
    "print_header",
    "print_success",
    "print_error",
    "print_warning",
    "print_info",
    "print_separator",
    "print_dim",
    "print_status",
];

impl Framework {
    /// Processing order during consolidation.
    pub const ALL: [Framework; 2] = [Framework::Test, Framework::Ui];

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Test => "test",
            Framework::Ui => "ui",
        }
    }

    /// Functions the framework defines centrally.
    pub fn functions(self) -> &'static [&'static str] {
        match self {
            Framework::Test => TEST_FUNCTIONS,
            Framework::Ui => UI_FUNCTIONS,
        }
    }

    pub fn function_set(self) -> HashSet<&'static str> {
        self.functions().iter().copied().collect()
    }

    /// Fragment whose presence means the framework is already sourced.
    pub fn import_fragment(self) -> &'static str {
        match self {
            Framework::Test => "test_framework_core.sh",
            Framework::Ui => "print_utils.sh",
        }
    }

    /// Location of the framework relative to the project root.
    pub fn relative_path(self) -> &'static str {
        match self {
            Framework::Test => "tests/lib/test_framework_core.sh",
            Framework::Ui => "lib/ui/common/print_utils.sh",
        }
    }

    /// The block inserted into files that need the framework.
    ///
    /// It starts and ends with a newline so that it sits between blank lines
    /// once inserted as a single line element.
    pub fn import_block(self) -> String {
        let label = match self {
            Framework::Test => "test",
            Framework::Ui => "UI",
        };
        let source = format!("${{SERVERSENTRY_ROOT}}/{}", self.relative_path());
        format!(
            "\n# Load unified {label} framework\nif [[ -f \"{source}\" ]]; then\n  source \"{source}\"\nfi\n"
        )
    }

    /// True when `content` mentions any of the framework's function names.
    pub fn is_needed_by(self, content: &str) -> bool {
        self.functions().iter().any(|func| content.contains(func))
    }

    pub fn is_imported_in(self, content: &str) -> bool {
        content.contains(self.import_fragment())
    }

    /// True when `path` is the framework's own source file.
    pub fn is_provided_by(self, path: &Path) -> bool {
        path.ends_with(self.relative_path())
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line index at which a framework import block should be inserted.
///
/// Starting at the first line mentioning the environment sentinel, this is
/// the line after the first line that is exactly `fi` (trailing whitespace
/// aside) such that the text from the sentinel line up to that `fi` mentions
/// "bootstrap" (case-insensitive). Indented `fi` lines close inner blocks and
/// never qualify. Falls back to 0.
pub fn find_injection_point(lines: &[&str]) -> usize {
    const NEEDLE: &[u8] = b"bootstrap";

    let Some(marker) = lines.iter().position(|line| line.contains(ENV_SENTINEL)) else {
        return 0;
    };

    let mut seen = String::new();
    let mut found = false;
    for (index, line) in lines.iter().enumerate().skip(marker) {
        if found && line.trim_end() == "fi" {
            return index + 1;
        }
        // Only the tail can complete a new match, including one spanning the join.
        let tail_start = seen.len().saturating_sub(NEEDLE.len() - 1);
        seen.push_str(&line.to_lowercase());
        found = found || seen.as_bytes()[tail_start..].windows(NEEDLE.len()).any(|w| w == NEEDLE);
    }

    0
}

/// Insert `framework`'s import block at the computed injection point.
pub fn add_framework_import(content: &str, framework: Framework) -> String {
    let block = framework.import_block();
    let mut lines: Vec<&str> = content.split('\n').collect();
    let index = find_injection_point(&lines);
    lines.insert(index, &block);
    lines.join("\n")
}

/// Result of consolidating one file's text against the shared frameworks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedText {
    pub content: String,
    /// Frameworks whose import block was inserted.
    pub imports_added: Vec<Framework>,
    /// Frameworks the text needed (imports added or already present).
    pub frameworks_needed: Vec<Framework>,
    /// Local function definitions stripped because a framework provides them.
    pub functions_removed: usize,
    pub changed: bool,
}

/// Source the needed frameworks and strip local copies of their functions.
///
/// Frameworks are processed in the order given; each decision is made on the
/// text produced by the previous step. Running this on its own output changes
/// nothing.
pub fn consolidate_text(content: &str, frameworks: &[Framework], mode: BraceMode) -> ConsolidatedText {
    let mut text = content.to_string();
    let mut imports_added = Vec::new();
    let mut frameworks_needed = Vec::new();
    let mut functions_removed = 0;

    for &framework in frameworks {
        if !framework.is_needed_by(&text) {
            continue;
        }
        frameworks_needed.push(framework);

        if !framework.is_imported_in(&text) {
            text = add_framework_import(&text, framework);
            imports_added.push(framework);
        }

        let names = framework.function_set();
        let local = definitions_matching(Path::new(""), &text, mode, |name| names.contains(name));
        if !local.is_empty() {
            functions_removed += local.len();
            text = remove_functions(&text, &names, mode);
        }
    }

    let changed = text != content;
    ConsolidatedText { content: text, imports_added, frameworks_needed, functions_removed, changed }
}
