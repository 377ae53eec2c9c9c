//! Schema model, slot induction, and the resolved document.

pub mod document;
pub mod model;
pub mod resolution;

pub use document::{ClassDef, SchemaDocument};
pub use model::{
    BUILTIN_IMPORT_PREFIX, ClassDefinition, ImportPrecedence, SchemaDefinition, SlotDefinition,
    is_builtin_import,
};
pub use resolution::{ancestors, materialize};
