pub mod common;
pub mod project_structure;
pub mod template;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use project_structure::ProjectStructure;
pub use template::{ProjectTemplate, RenderContext, TemplateSet, TemplateText};
