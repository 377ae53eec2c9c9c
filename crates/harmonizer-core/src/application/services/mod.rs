//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve a schema" or "generate a project".

pub mod generate_service;
pub mod schema_resolver;

pub use generate_service::{GenerateOptions, GenerateReport, GenerateRequest, GenerateService};
pub use schema_resolver::SchemaResolver;
