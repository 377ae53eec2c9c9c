//! CLI errors: what the operator sees on stderr and the process exit code.

use std::error::Error;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use harmonizer_core::error::{ErrorCategory as CoreCategory, HarmonizerError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// `--name` or the prompted name cannot be an npm package name.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// The settings file could not be read, parsed or serialised, or a
    /// `config get` key is unknown.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Schema resolution, generation or installation failed.
    #[error(transparent)]
    Core(#[from] HarmonizerError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The operator dismissed the name or class prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// Prompts were needed but the binary was built without `interactive`.
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// How an error is classified for exit codes and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "The name becomes the npm package name in package.json".into(),
                "Use lowercase letters, digits, hyphens and underscores".into(),
                "Examples: mpox-harmonizer, grdi_dh".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check the settings file (default: {})",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'gen-harmonizer config list' to see the effective values".into(),
                "Run 'gen-harmonizer init' to write a default file".into(),
            ],
            Self::Core(core) => {
                let mut hints = core.suggestions();
                if core.is_resolution() {
                    hints.push("Run with -vv to trace each import as it is resolved".into());
                }
                hints
            }
            Self::IoError { .. } => vec!["Check file permissions and free space".into()],
            Self::Cancelled => vec!["No files were written".into()],
            Self::FeatureNotAvailable { feature } => vec![
                "Pass --yes or --class to run without prompts".into(),
                format!("Or rebuild with: cargo install harmonizer-cli --features {feature}"),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// 2 for operator mistakes, 3 for missing schemas or programs, 4 for
    /// settings problems, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The stderr report: message, causes when `verbose`, then suggestions.
    /// `styled` adds ANSI colour.
    pub fn report(&self, verbose: bool, styled: bool) -> String {
        let paint = |text: String, style: fn(&str) -> String| {
            if styled { style(&text) } else { text }
        };
        let mut out = String::new();

        let _ = writeln!(
            out,
            "\n{} {self}",
            paint("Error:".into(), |s| s.red().bold().to_string())
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(format!("Caused by: {err}"), |s| s.dimmed().to_string())
                );
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Suggestions:".into(), |s| s.yellow().bold().to_string())
            );
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Use -v / --verbose for more details.".into(), |s| s
                    .dimmed()
                    .to_string())
            );
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(exit_code = self.exit_code(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(exit_code = self.exit_code(), "{self}")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!("caused by: {source}");
        }
    }
}
