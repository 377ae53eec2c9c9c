//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `harmonizer-adapters` and the
//! CLI implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SchemaSource`: Schema document loading
//!   - `OperatorPrompt`: Project name and class selection
//!   - `TemplateSource`: Project skeleton retrieval
//!   - `TemplateRenderer`: Template rendering
//!   - `Filesystem`: File operations
//!   - `PackageInstaller`: Dependency installation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Filesystem, LoadedSchema, OperatorPrompt, PackageInstaller, PromptRequest, SchemaSource,
    TemplateRenderer, TemplateSource,
};
