//! Pure text transformations. Nothing in here touches the filesystem; the
//! file-level drivers live in `services`.

pub mod bootstrap;
pub mod commands;
pub mod frameworks;
pub mod remover;

pub use bootstrap::{count_legacy_blocks, migrate_text, needs_migration, CANONICAL_BOOTSTRAP};
pub use commands::{
    collapse_blank_runs, command_block_regex, strip_command_blocks, DEFAULT_COMMANDS_FILE,
    DEFAULT_EXTRACTED_COMMANDS,
};
pub use frameworks::{
    add_framework_import, consolidate_text, find_injection_point, ConsolidatedText, Framework,
};
pub use remover::remove_functions;
