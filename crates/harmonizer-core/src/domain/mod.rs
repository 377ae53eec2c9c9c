// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for gen-harmonizer.
//!
//! Pure logic only: schema inheritance resolution, candidate filtering,
//! artifact building and the project skeleton model. Loading, prompting,
//! rendering and writing are reached through the ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Pure transformations**: resolution builds a new `SchemaDocument`
//!   instead of mutating what was loaded
//!
// Public API - what the world sees
pub mod artifacts;
pub mod class_filter;
pub mod entities;
pub mod error;
pub mod schema;

mod validation;

// Re-exports for convenience
pub use artifacts::{
    ArtifactBuilder, Artifacts, ClassSelection, MENU_FILE_NAME, ManifestEntry,
    PublicationStatus, SCHEMAS_DIR, SelectionManifest,
};
pub use class_filter::{ClassCandidate, DEFAULT_INTERFACE_MARKER, candidates, default_selection};
pub use entities::{
    RelativePath,
    project_structure::{FileToWrite, ProjectStructure},
    template::{ProjectTemplate, RenderContext, TemplateSet, TemplateText},
};
pub use error::{DomainError, ErrorCategory};
pub use schema::{
    ClassDef, ClassDefinition, ImportPrecedence, SchemaDefinition, SchemaDocument,
    SlotDefinition, is_builtin_import, materialize,
};
pub use validation::DomainValidator;
