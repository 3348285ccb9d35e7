//! Line classification for loosely structured shell source.
//!
//! There is no shell lexer here: function boundaries are found with a header
//! regex plus a running brace-depth counter, and bootstrap blocks with a
//! multi-line regex.

pub mod braces;
pub mod patterns;

pub use braces::{brace_delta, BraceMode, BraceTracker};
pub use patterns::{
    contains_legacy_bootstrap, definitions_matching, find_function_definitions,
    function_header_name, function_names, legacy_bootstrap_regex, BOOTSTRAP_COMMENT,
    ENV_SENTINEL, LEGACY_BOOTSTRAP_PATH,
};
