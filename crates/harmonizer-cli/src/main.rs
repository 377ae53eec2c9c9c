//! # gen-harmonizer
//!
//! Turns a LinkML schema into a ready-to-run DataHarmonizer web project.
//!
//! `main` parses arguments, installs logging, loads settings and hands the
//! subcommand to [`commands`]. Every failure comes back as a [`CliError`]
//! and is reported once, in [`report`].
//!
//! | Exit | Meaning                                         |
//! |------|-------------------------------------------------|
//! |  0   | Project generated / command succeeded           |
//! |  1   | Install or file system failure                  |
//! |  2   | Bad arguments, invalid schema, empty selection  |
//! |  3   | Schema, class or install program not found      |
//! |  4   | Settings file or build feature problem          |

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
mod prompt;

fn main() -> ExitCode {
    // HARMONIZER_* variables may come from a .env next to the schemas.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures.
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        config = ?cli.global.config,
        "starting"
    );

    let verbose = cli.global.verbose > 0;

    // `init` is what creates the file `--config` points at.
    let must_exist = !matches!(cli.command, Commands::Init(_));
    let config = match AppConfig::load(cli.global.config.as_ref(), must_exist) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: Some(e.into()),
            };
            return report(err, verbose, !cli.global.no_color);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let color = !(cli.global.no_color || config.output.no_color);

    match run(cli, config, output) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => report(e, verbose, color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, cli.global, config, output),
        Commands::Classes(cmd) => commands::classes::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, cli.global.config, output),
    }
}

/// Log `err`, print its report on stderr and map it to an exit code.
/// Colour needs both `color` and a terminal on stderr.
fn report(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    eprint!(
        "{}",
        err.report(verbose, color && std::io::stderr().is_terminal())
    );
    ExitCode::from(err.exit_code())
}
