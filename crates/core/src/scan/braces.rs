use serde::{Deserialize, Serialize};

/// How brace characters are counted when looking for the end of a function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceMode {
    /// Every `{` and `}` on the line counts, including those in strings and comments.
    Naive,
    /// Braces inside single/double quotes or after a `#` comment marker are ignored.
    ///
    /// Quote state does not carry across lines and here-documents are not recognized.
    #[default]
    QuoteAware,
}

/// Net brace depth change contributed by one line.
pub fn brace_delta(line: &str, mode: BraceMode) -> i64 {
    match mode {
        BraceMode::Naive => naive_delta(line),
        BraceMode::QuoteAware => quote_aware_delta(line),
    }
}

fn naive_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

fn quote_aware_delta(line: &str) -> i64 {
    let mut delta = 0;
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for c in line.chars() {
        if in_single {
            if c == '\'' {
                in_single = false;
            }
            continue;
        }
        if in_double {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_double = false;
            }
            continue;
        }
        if escaped {
            escaped = false;
            prev = Some(c);
            continue;
        }

        match c {
            '\\' => escaped = true,
            '\'' => in_single = true,
            '"' => in_double = true,
            // `#` only opens a comment at a word boundary; `$#` and `${#x}` are expansions.
            '#' if prev.map_or(true, |p| p.is_whitespace() || p == ';') => break,
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
        prev = Some(c);
    }

    delta
}

/// Running brace-depth counter for a single function body.
#[derive(Debug, Clone)]
pub struct BraceTracker {
    mode: BraceMode,
    depth: i64,
}

impl BraceTracker {
    pub fn new(mode: BraceMode) -> Self {
        Self { mode, depth: 0 }
    }

    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Seed the counter from a header line. Returns `true` if the body already closed.
    pub fn start(&mut self, header: &str) -> bool {
        self.depth = brace_delta(header, self.mode);
        self.depth <= 0
    }

    /// Account for the next body line. Returns `true` once depth is back to zero or below.
    pub fn feed(&mut self, line: &str) -> bool {
        self.depth += brace_delta(line, self.mode);
        self.depth <= 0
    }
}
