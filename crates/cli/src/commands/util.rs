use std::path::{Path, PathBuf};

use anyhow::Result;
use shtidy_core::config::ShtidyConfig;

use crate::canonicalize_or_current;

/// Resolve the root and load the effective config for it.
pub fn load_config(root: &str, config: Option<&str>) -> Result<(PathBuf, ShtidyConfig)> {
    let root_path = canonicalize_or_current(root)?;
    let config = ShtidyConfig::load(&root_path, config.map(Path::new))?;
    Ok((root_path, config))
}

/// Prefix for status lines when nothing is written.
pub fn dry_run_prefix(dry_run: bool) -> &'static str {
    if dry_run {
        "(dry run) "
    } else {
        ""
    }
}
