use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shtidy::commands::{
    audit_command, cleanup_commands_command, consolidate_command, migrate_bootstrap_command,
    show_config_command,
};
use shtidy::init_tracing;
use tracing::debug;

/// Maintenance and audit tooling for ServerSentry shell-script trees.
///
/// This CLI is a thin wrapper around `shtidy-core` (exposed in code as
/// `shtidy_core`). Every transformation lives in the library so it can be
/// tested without spawning processes.
#[derive(Parser, Debug)]
#[command(
    name = "shtidy",
    version,
    about = "Audit and refactor ServerSentry shell-script trees",
    long_about = None
)]
struct Cli {
    /// Project root directory. Defaults to the current working directory.
    #[arg(long, global = true, default_value = ".")]
    root: String,

    /// Config file (JSON or YAML). Defaults to `.shtidy.{json,yaml,yml}` in the root.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log at DEBUG level.
    #[arg(long, short, global = true, default_value_t = false, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only.
    #[arg(long, short, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit the shell-script tree and print a categorized report.
    ///
    /// Exits non-zero when any issue is found.
    Audit {
        /// Emit JSON instead of the human-readable report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Replace legacy dual-bootstrap blocks with the unified bootstrap.
    ///
    /// Each rewritten file is backed up to `<file>.backup` until the write
    /// succeeds.
    MigrateBootstrap {
        /// Report what would change without writing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Emit the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Source the shared test/UI frameworks instead of redefining their functions.
    Consolidate {
        /// Report what would change without writing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Emit the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Remove extracted `cmd_<name>` implementations from the monolithic command file.
    CleanupCommands {
        /// Command file relative to the root. Defaults to the configured file.
        #[arg(long)]
        file: Option<String>,

        /// Command name to remove (repeatable). Defaults to the configured list.
        #[arg(long = "command", value_name = "NAME")]
        commands: Vec<String>,

        /// Report what would change without writing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Print the effective configuration as JSON.
    ShowConfig,
}

fn run(cli: Cli) -> Result<bool> {
    let root = cli.root.as_str();
    let config = cli.config.as_deref();
    debug!(?cli.command, root, "dispatching");

    match cli.command {
        Command::Audit { json } => audit_command(root, config, json),
        Command::MigrateBootstrap { dry_run, json } => {
            migrate_bootstrap_command(root, config, dry_run, json)
        }
        Command::Consolidate { dry_run, json } => consolidate_command(root, config, dry_run, json),
        Command::CleanupCommands { file, commands, dry_run } => {
            cleanup_commands_command(root, config, file.as_deref(), &commands, dry_run)
        }
        Command::ShowConfig => show_config_command(root, config).map(|()| true),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.verbose, cli.quiet) {
        eprintln!("shtidy: warning: {err:#}");
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("shtidy: error: {err:#}");
            ExitCode::from(2)
        }
    }
}
