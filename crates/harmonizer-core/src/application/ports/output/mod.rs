//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `harmonizer-adapters` crate provides implementations; the operator
//! prompt lives in the CLI.

use std::path::Path;

use crate::domain::{
    ClassCandidate, ClassSelection, ProjectStructure, RenderContext, SchemaDefinition,
    TemplateSet,
};
use crate::error::HarmonizerResult;

/// A schema document as read by a [`SchemaSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSchema {
    /// Canonical locator, as returned by [`SchemaSource::locate`].
    pub locator: String,
    pub definition: SchemaDefinition,
}

/// Port for reading schema documents.
///
/// Implemented by:
/// - `harmonizer_adapters::schema_source::FileSchemaSource` (YAML / JSON files)
pub trait SchemaSource: Send + Sync {
    /// Canonical locator of `locator`, without reading the document. `base`
    /// is the canonical locator of the importing document, `None` for the
    /// root schema. Two imports naming the same document yield the same
    /// locator; cycle detection and the import cache key on it.
    fn locate(&self, locator: &str, base: Option<&str>) -> HarmonizerResult<String>;

    /// Read and parse the document at a canonical locator.
    fn load(&self, canonical: &str) -> HarmonizerResult<LoadedSchema>;
}

/// What the operator is asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub default_project_name: String,
    pub schema_name: String,
    pub candidates: Vec<ClassCandidate>,
}

/// Port for collecting the operator's answers.
///
/// Implemented by:
/// - `harmonizer_cli::prompt::InteractivePrompt` (terminal dialogs)
/// - `harmonizer_cli::prompt::PresetPrompt` (flags, `--yes`)
#[cfg_attr(test, mockall::automock)]
pub trait OperatorPrompt: Send + Sync {
    /// Asked exactly once per run.
    fn ask(&self, request: &PromptRequest) -> HarmonizerResult<ClassSelection>;
}

/// Port for obtaining the project skeleton.
///
/// Implemented by:
/// - `harmonizer_adapters::templates::BuiltinTemplates` (compiled in)
/// - `harmonizer_adapters::templates::DirectoryTemplates` (user directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    fn templates(&self) -> HarmonizerResult<TemplateSet>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `harmonizer_adapters::renderer::SubstitutionRenderer` (placeholder substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render every template of `templates` into a project structure rooted
    /// at `output_root`.
    fn render(
        &self,
        templates: &TemplateSet,
        context: &RenderContext,
        output_root: &Path,
    ) -> HarmonizerResult<ProjectStructure>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `harmonizer_adapters::filesystem::LocalFilesystem` (production)
/// - `harmonizer_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HarmonizerResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> HarmonizerResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for installing the generated project's dependencies.
///
/// Implemented by:
/// - `harmonizer_adapters::installer::CommandInstaller` (`npm install`)
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    /// Program name, for messages.
    fn program(&self) -> String;

    /// Install dependencies in `dir`.
    fn install(&self, dir: &Path) -> HarmonizerResult<()>;
}
