//! # nestgen
//!
//! Scaffolds a NestJS + TypeORM + Swagger CRUD module from a single name.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! |  0   | Success                                          |
//! |  1   | Missing module name, generator or system error   |
//! |  2   | Invalid input or usage                           |
//! |  4   | Configuration error                              |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version land here too, with exit code 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    let plain_errors = cli.global.no_color || !std::io::stderr().is_terminal();

    // ── 3. Load configuration ─────────────────────────────────────────────
    // `init` writes the file, `completions` never reads it, and a bare
    // invocation fails on the missing module name before any file access.
    let config = match &cli.command {
        None | Some(Commands::Init(_) | Commands::Completions(_)) => AppConfig::default(),
        _ => match AppConfig::load(cli.global.config.as_ref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                let err = CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: None,
                };
                return handle_error(err, verbose, plain_errors);
            }
        },
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let plain_errors = plain_errors || config.output.no_color;
    match run(cli, config, output) {
        Ok(()) => {
            info!("nestgen completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, plain_errors),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let config_file = cli.global.config.as_deref();
    match cli.command {
        None => Err(CliError::MissingModuleName),
        Some(Commands::Generate(args)) => commands::generate::execute(args, config, output),
        Some(Commands::Init(args)) => commands::init::execute(args, config_file, output),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        Some(Commands::Config(cmd)) => {
            commands::config::execute(cmd, config, config_file, output)
        }
    }
}

/// Translate a `CliError` into a user message and an exit code.
///
/// Written to stderr so the message appears even when stdout is redirected.
fn handle_error(err: CliError, verbose: bool, plain: bool) -> ExitCode {
    err.log();

    let msg = if plain {
        err.format_plain(verbose)
    } else {
        err.format_colored(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn bare_invocation_is_a_missing_module_name() {
        let cli = Cli::try_parse_from(["nestgen"]).unwrap();
        let output = OutputManager::new(&cli.global, &AppConfig::default());
        let err = run(cli, AppConfig::default(), output).unwrap_err();
        assert!(matches!(err, CliError::MissingModuleName));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }
}
