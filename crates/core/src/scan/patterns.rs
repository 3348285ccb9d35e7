use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::FunctionDefinition;
use crate::scan::braces::{BraceMode, BraceTracker};

/// Environment variable set once the ServerSentry environment is loaded.
pub const ENV_SENTINEL: &str = "SERVERSENTRY_ENV_LOADED";

/// Path fragment of the legacy (dual) bootstrap file.
pub const LEGACY_BOOTSTRAP_PATH: &str = "lib/serversentry-bootstrap.sh";

/// Comment line opening every bootstrap block.
pub const BOOTSTRAP_COMMENT: &str = "# Load ServerSentry environment";

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*)\s*\(\)\s*\{").expect("valid function header regex")
    })
}

fn multiline_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^([a-zA-Z_][a-zA-Z0-9_]*)\s*\(\)\s*\{")
            .expect("valid multi-line function header regex")
    })
}

/// Regex matching a whole legacy bootstrap block, from the comment line
/// through the closing `fi`.
pub fn legacy_bootstrap_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?ms)# Load ServerSentry environment.*?\n",
            r#"if \[\[ -z "\$\{SERVERSENTRY_ENV_LOADED:-\}" \]\]; then\s*\n"#,
            r".*?lib/serversentry-bootstrap\.sh.*?",
            r"^fi\s*$",
        ))
        .expect("valid legacy bootstrap regex")
    })
}

/// Name of the function defined on `line`, if the line starts a definition.
///
/// The match is anchored at the start of `line`; callers that accept indented
/// definitions trim the line first.
pub fn function_header_name(line: &str) -> Option<&str> {
    header_regex().captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Every function name defined at column zero anywhere in `content`, in order.
///
/// A name defined twice in the same text is returned twice.
pub fn function_names(content: &str) -> Vec<&str> {
    multiline_header_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// True when `content` holds at least one legacy bootstrap block.
pub fn contains_legacy_bootstrap(content: &str) -> bool {
    legacy_bootstrap_regex().is_match(content)
}

/// Locate the definitions whose names satisfy `wanted`.
///
/// Lines are split on `\n`. While inside a tracked definition no new headers
/// are recognized. A definition whose braces never balance runs to the last line.
pub fn definitions_matching<F>(
    file: &Path,
    content: &str,
    mode: BraceMode,
    mut wanted: F,
) -> Vec<FunctionDefinition>
where
    F: FnMut(&str) -> bool,
{
    let mut found = Vec::new();
    let mut open: Option<(String, usize, BraceTracker)> = None;
    let mut last_index = 0;

    for (index, line) in content.split('\n').enumerate() {
        last_index = index;

        if let Some((_, _, tracker)) = open.as_mut() {
            if tracker.feed(line) {
                if let Some((name, start, _)) = open.take() {
                    found.push(FunctionDefinition {
                        file: file.to_path_buf(),
                        name,
                        start_line: start,
                        end_line: index,
                    });
                }
            }
            continue;
        }

        let Some(name) = function_header_name(line.trim()) else {
            continue;
        };
        if !wanted(name) {
            continue;
        }

        let mut tracker = BraceTracker::new(mode);
        if tracker.start(line) {
            found.push(FunctionDefinition {
                file: file.to_path_buf(),
                name: name.to_string(),
                start_line: index,
                end_line: index,
            });
        } else {
            open = Some((name.to_string(), index, tracker));
        }
    }

    if let Some((name, start, _)) = open {
        found.push(FunctionDefinition {
            file: file.to_path_buf(),
            name,
            start_line: start,
            end_line: last_index,
        });
    }

    found
}

/// Locate every top-level function definition in `content`.
pub fn find_function_definitions(
    file: &Path,
    content: &str,
    mode: BraceMode,
) -> Vec<FunctionDefinition> {
    definitions_matching(file, content, mode, |_| true)
}
