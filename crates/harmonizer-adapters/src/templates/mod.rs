//! Template sources: the compiled-in project skeleton and user directories.

mod builtin;
mod directory;

pub use builtin::BuiltinTemplates;
pub use directory::DirectoryTemplates;
