//! Infrastructure adapters for gen-harmonizer.
//!
//! This crate implements the ports defined in
//! `harmonizer_core::application::ports`. It contains all external
//! dependencies and I/O operations apart from the operator prompt.

pub mod filesystem;
pub mod installer;
pub mod renderer;
pub mod schema_source;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::CommandInstaller;
pub use renderer::SubstitutionRenderer;
pub use schema_source::FileSchemaSource;
pub use templates::{BuiltinTemplates, DirectoryTemplates};
