//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use harmonizer_core::domain::ImportPrecedence;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "gen-harmonizer",
    bin_name = "gen-harmonizer",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a DataHarmonizer project from a LinkML schema",
    long_about = "gen-harmonizer resolves a LinkML schema (imports and inherited \
                  slots), asks which classes become DataHarmonizer templates, \
                  and writes a ready-to-run web project.",
    after_help = "EXAMPLES:\n\
        \x20 gen-harmonizer new schemas/mpox.yaml ./mpox-dh\n\
        \x20 gen-harmonizer new schemas/mpox.yaml ./mpox-dh --yes --skip-install\n\
        \x20 gen-harmonizer classes schemas/mpox.yaml\n\
        \x20 gen-harmonizer completions bash > /usr/share/bash-completion/completions/gen-harmonizer",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project from a schema.
    #[command(
        visible_alias = "n",
        about = "Generate a DataHarmonizer project",
        after_help = "EXAMPLES:\n\
            \x20 gen-harmonizer new mpox.yaml ./mpox-dh\n\
            \x20 gen-harmonizer new mpox.yaml ./mpox-dh --name mpox --class Mpox --class MpoxInternational\n\
            \x20 gen-harmonizer new mpox.yaml ./mpox-dh --yes --templates ./my-skeleton"
    )]
    New(NewArgs),

    /// List the classes a schema offers.
    #[command(
        visible_alias = "ls",
        about = "List candidate classes of a schema",
        after_help = "EXAMPLES:\n\
            \x20 gen-harmonizer classes mpox.yaml\n\
            \x20 gen-harmonizer classes mpox.yaml --format json\n\
            \x20 gen-harmonizer classes mpox.yaml --marker my_interface"
    )]
    Classes(ClassesArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 gen-harmonizer init\n\
            \x20 gen-harmonizer init --force\n\
            \x20 gen-harmonizer --config ./harmonizer.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 gen-harmonizer completions bash > ~/.local/share/bash-completion/completions/gen-harmonizer\n\
            \x20 gen-harmonizer completions zsh  > ~/.zfunc/_gen-harmonizer\n\
            \x20 gen-harmonizer completions fish > ~/.config/fish/completions/gen-harmonizer.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 gen-harmonizer config get defaults.interface_marker\n\
            \x20 gen-harmonizer config list\n\
            \x20 gen-harmonizer config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `gen-harmonizer new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Root schema file. Imports are resolved relative to it.
    #[arg(value_name = "SCHEMA", help = "LinkML schema file (YAML or JSON)")]
    pub schema: String,

    /// Project directory; created if missing.
    #[arg(value_name = "DEST", help = "Directory to generate the project in")]
    pub destination: PathBuf,

    /// Project name; skips the name question.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Project name (default: destination directory name)"
    )]
    pub name: Option<String>,

    /// Classes to expose; skips the class question. Repeatable.
    #[arg(
        long = "class",
        value_name = "CLASS",
        help = "Class to expose as a template (repeatable)"
    )]
    pub classes: Vec<String>,

    /// Accept every default without prompting.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Accept defaults without prompting"
    )]
    pub yes: bool,

    /// Overwrite artifacts from an earlier run.
    #[arg(long = "force", help = "Overwrite existing schema artifacts")]
    pub force: bool,

    /// Do not run the package installer.
    #[arg(long = "skip-install", help = "Skip `npm install`")]
    pub skip_install: bool,

    /// Template directory replacing the built-in skeleton.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Project template directory (default: built-in skeleton)"
    )]
    pub templates: Option<PathBuf>,

    /// Interface marker class.
    #[arg(
        long = "marker",
        value_name = "CLASS",
        help = "Marker class whose descendants are pre-selected"
    )]
    pub marker: Option<String>,

    /// Which side wins when an import redefines a local element.
    #[arg(
        long = "import-precedence",
        value_name = "SIDE",
        value_enum,
        help = "Winner of import/local name collisions"
    )]
    pub import_precedence: Option<Precedence>,
}

// ── classes ───────────────────────────────────────────────────────────────────

/// Arguments for `gen-harmonizer classes`.
#[derive(Debug, Args)]
pub struct ClassesArgs {
    /// Root schema file.
    #[arg(value_name = "SCHEMA", help = "LinkML schema file (YAML or JSON)")]
    pub schema: String,

    /// Interface marker class.
    #[arg(
        long = "marker",
        value_name = "CLASS",
        help = "Marker class whose descendants are pre-selected"
    )]
    pub marker: Option<String>,

    /// Which side wins when an import redefines a local element.
    #[arg(
        long = "import-precedence",
        value_name = "SIDE",
        value_enum,
        help = "Winner of import/local name collisions"
    )]
    pub import_precedence: Option<Precedence>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `classes` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `gen-harmonizer init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `gen-harmonizer completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `gen-harmonizer config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `install.program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// `--import-precedence` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Precedence {
    /// The importing schema keeps its own definitions.
    Local,
    /// Imported definitions replace local ones.
    Import,
}

impl From<Precedence> for ImportPrecedence {
    fn from(value: Precedence) -> Self {
        match value {
            Precedence::Local => Self::Local,
            Precedence::Import => Self::Import,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
