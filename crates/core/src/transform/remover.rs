use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

use crate::scan::{definitions_matching, BraceMode};

/// Remove every definition of a function named in `names` from `content`.
///
/// A definition runs from its header line through the line where the brace
/// depth returns to zero or below; both ends are dropped. All other lines
/// are kept byte-for-byte, including blank lines and the trailing newline.
/// A definition whose braces never balance swallows the rest of the text.
pub fn remove_functions<S>(content: &str, names: &HashSet<S>, mode: BraceMode) -> String
where
    S: Hash + Eq + Borrow<str>,
{
    let spans = definitions_matching(Path::new(""), content, mode, |name| names.contains(name));
    if spans.is_empty() {
        return content.to_string();
    }

    let mut spans = spans.iter().peekable();
    let mut kept: Vec<&str> = Vec::new();
    for (index, line) in content.split('\n').enumerate() {
        while spans.peek().is_some_and(|span| span.end_line < index) {
            spans.next();
        }
        let deleted = spans.peek().is_some_and(|span| span.start_line <= index);
        if !deleted {
            kept.push(line);
        }
    }

    kept.join("\n")
}
