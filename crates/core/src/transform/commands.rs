use std::sync::OnceLock;

use regex::Regex;

use crate::error::{TidyError, TidyResult};

/// Commands already extracted out of the monolithic command file.
pub const DEFAULT_EXTRACTED_COMMANDS: &[&str] = &["template", "composite"];

/// Default location of the monolithic command file, relative to the root.
pub const DEFAULT_COMMANDS_FILE: &str = "lib/ui/cli/commands.sh";

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\n\n+").expect("valid blank-run regex"))
}

/// Regex matching `# Command: <name>` followed by the `cmd_<name>` definition,
/// up to the first line that starts with `}`.
pub fn command_block_regex(name: &str) -> TidyResult<Regex> {
    let escaped = regex::escape(name);
    let pattern = format!(r"(?s)# Command: {escaped}\ncmd_{escaped}\(\) \{{.*?\n\}}");
    Regex::new(&pattern).map_err(|e| TidyError::Pattern { pattern, message: e.to_string() })
}

/// Collapse every run of three or more newlines into exactly two.
pub fn collapse_blank_runs(content: &str) -> String {
    blank_run_regex().replace_all(content, "\n\n").into_owned()
}

/// Remove the implementation blocks of `commands` and normalize blank lines.
pub fn strip_command_blocks<S: AsRef<str>>(content: &str, commands: &[S]) -> TidyResult<String> {
    let mut text = content.to_string();
    for command in commands {
        let re = command_block_regex(command.as_ref())?;
        text = re.replace_all(&text, "").into_owned();
    }
    Ok(collapse_blank_runs(&text))
}
