use regex::NoExpand;

use crate::scan::{legacy_bootstrap_regex, LEGACY_BOOTSTRAP_PATH};

/// The single-bootstrap block that replaces every legacy block.
pub const CANONICAL_BOOTSTRAP: &str = r#"# Load ServerSentry environment
if [[ -z "${SERVERSENTRY_ENV_LOADED:-}" ]]; then
  # Set bootstrap control variables
  export SERVERSENTRY_QUIET=true
  export SERVERSENTRY_AUTO_INIT=false
  export SERVERSENTRY_INIT_LEVEL=minimal
  
  # Find and source the main bootstrap file
  current_dir="$(cd "$(dirname "${BASH_SOURCE[0]}")" && pwd)"
  while [[ "$current_dir" != "/" ]]; do
    if [[ -f "$current_dir/serversentry-env.sh" ]]; then
      source "$current_dir/serversentry-env.sh"
      break
    fi
    current_dir="$(dirname "$current_dir")"
  done
  
  # Verify bootstrap succeeded
  if [[ -z "${SERVERSENTRY_ENV_LOADED:-}" ]]; then
    echo "❌ ERROR: Failed to load ServerSentry environment" >&2
    exit 1
  fi
fi"#;

/// Cheap pre-filter: does the text reference the legacy bootstrap file at all?
pub fn needs_migration(content: &str) -> bool {
    content.contains(LEGACY_BOOTSTRAP_PATH)
}

/// Number of legacy bootstrap blocks in `content`.
pub fn count_legacy_blocks(content: &str) -> usize {
    legacy_bootstrap_regex().find_iter(content).count()
}

/// Replace every legacy bootstrap block with [`CANONICAL_BOOTSTRAP`].
///
/// Returns `None` when nothing matched. The replacement is literal; `$`
/// sequences in the canonical block are not treated as capture references.
pub fn migrate_text(content: &str) -> Option<String> {
    let migrated = legacy_bootstrap_regex().replace_all(content, NoExpand(CANONICAL_BOOTSTRAP));
    if migrated == content {
        None
    } else {
        Some(migrated.into_owned())
    }
}
