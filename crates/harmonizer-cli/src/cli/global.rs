//! Flags shared by every subcommand, flattened into [`super::Cli`].

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log more about schema resolution and file generation.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase log detail (-v, -vv, -vvv)",
        long_help = "Increase log detail on stderr:
    (none)  - warnings and errors only
    -v      - resolved imports, selected classes, written files
    -vv     - per-class filtering and template rendering
    -vvv    - everything, including dependency crates' spans"
    )]
    pub verbose: u8,

    /// Print nothing on stdout. Selection prompts are skipped and the
    /// default class selection is used.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output and skip prompts"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Settings file. Without it, `config.toml` under the platform config
    /// directory for gen-harmonizer is read if present.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "HARMONIZER_CONFIG",
        value_name = "FILE",
        help = "Path to a gen-harmonizer settings file"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed on stdout"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of stdout. `auto` defers to `output.format` in the settings
/// file, then to terminal detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Colored summaries and tables.
    Human,
    Plain,
    /// One JSON document per command.
    Json,
}
