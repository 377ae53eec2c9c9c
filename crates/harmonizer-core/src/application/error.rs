//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! business logic. Business logic errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No schema document exists at the locator.
    #[error("Schema not found: {locator}")]
    SchemaNotFound { locator: String },

    /// The schema document exists but could not be read or parsed.
    #[error("Failed to load schema {locator}: {reason}")]
    SchemaLoad { locator: String, reason: String },

    /// Template set could not be loaded.
    #[error("Failed to load templates from {origin}: {reason}")]
    TemplateLoad { origin: String, reason: String },

    /// Two templates rendered to the same output path.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Schema artifacts would overwrite files from an earlier run.
    #[error("Schema artifacts already exist at {path}")]
    ArtifactsExist { path: PathBuf },

    /// The operator prompt could not be completed.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The operator dismissed the prompt.
    #[error("Prompt cancelled")]
    PromptCancelled,

    /// The package installer is not on PATH.
    #[error("Could not find `{program}`")]
    InstallerNotFound { program: String },

    /// The package installer ran and failed. `program` is the full command line.
    #[error("Unable to run `{program}` in {}: {reason}", dir.display())]
    InstallFailed {
        program: String,
        dir: PathBuf,
        reason: String,
    },

    /// The in-memory filesystem lock was poisoned by a panicking writer.
    #[error("In-memory filesystem lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SchemaNotFound { locator } => vec![
                format!("No schema file at: {locator}"),
                "Imports are looked up relative to the importing file".into(),
                "Tried the extensions .yaml, .yml and .json".into(),
            ],
            Self::SchemaLoad { .. } => vec![
                "Check that the file is valid YAML or JSON".into(),
                "Schema elements (classes, slots) must be maps keyed by name".into(),
            ],
            Self::TemplateLoad { origin, .. } => vec![
                format!("Check the template directory: {origin}"),
                "Omit --templates to use the built-in project skeleton".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ArtifactsExist { path } => vec![
                format!("Directory already contains schema artifacts: {}", path.display()),
                "Use --force to overwrite them".into(),
                "Or choose a different destination".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run in a terminal, or pass --yes / --class to skip the prompt".into(),
            ],
            Self::PromptCancelled => vec!["No files were written".into()],
            Self::InstallerNotFound { program } => vec![
                format!("`{program}` is not on your PATH"),
                "You may need to install Node.js".into(),
                "Or pass --skip-install and install dependencies later".into(),
            ],
            Self::InstallFailed { program, dir, .. } => vec![
                "The project files were written; only the install step failed".into(),
                format!("Retry with: cd {} && {program}", dir.display()),
            ],
            Self::StoreLockError => vec!["An earlier write panicked; start a new run".into()],
            Self::RenderingFailed { .. } => vec![
                "A template directory may hold both `name` and `name.tpl`".into(),
                "Keep only one of them".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SchemaNotFound { .. } => ErrorCategory::NotFound,
            Self::SchemaLoad { .. } => ErrorCategory::Validation,
            Self::TemplateLoad { .. } => ErrorCategory::Configuration,
            Self::ArtifactsExist { .. } => ErrorCategory::Validation,
            Self::PromptFailed { .. } | Self::PromptCancelled => ErrorCategory::Validation,
            Self::InstallerNotFound { .. } => ErrorCategory::NotFound,
            Self::InstallFailed { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::RenderingFailed { .. } => ErrorCategory::Configuration,
        }
    }
}
