// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Schema resolution errors
    // ========================================================================
    #[error("import cycle: {}", chain.join(" -> "))]
    ImportCycle { chain: Vec<String> },

    #[error("class '{class}' inherits from itself")]
    InheritanceCycle { class: String },

    #[error("class '{class}' refers to unknown ancestor '{ancestor}'")]
    UnknownAncestor { class: String, ancestor: String },

    #[error("class '{class}' uses undefined slot '{slot}'")]
    UnknownSlot { class: String, slot: String },

    // ========================================================================
    // Selection errors
    // ========================================================================
    #[error("No classes selected. Project will not be generated.")]
    EmptySelection,

    #[error("class '{class}' is not defined in the schema")]
    ClassNotInSchema { class: String },

    #[error("class '{class}' is not offered as a template")]
    NotACandidate { class: String },

    #[error("schema name '{name}' cannot name an artifact: {reason}")]
    InvalidSchemaName { name: String, reason: String },

    // ========================================================================
    // Template and structure errors
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Duplicate path in project: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("failed to serialize {artifact}: {reason}")]
    SerializationFailed { artifact: String, reason: String },
}

impl DomainError {
    /// Errors raised while resolving imports and inheritance.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::ImportCycle { .. }
                | Self::InheritanceCycle { .. }
                | Self::UnknownAncestor { .. }
                | Self::UnknownSlot { .. }
        )
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ImportCycle { chain } => vec![
                "Schemas may not import each other in a loop".into(),
                format!(
                    "Remove one of the imports between: {}",
                    chain.join(", ")
                ),
            ],
            Self::InheritanceCycle { class } => vec![format!(
                "Check the is_a and mixins declarations reachable from '{class}'"
            )],
            Self::UnknownAncestor { ancestor, .. } => vec![
                format!("Define class '{ancestor}' or import the schema that defines it"),
                "Check the spelling of is_a and mixins entries".into(),
            ],
            Self::UnknownSlot { slot, .. } => vec![
                format!("Add '{slot}' to the schema's slots section"),
                "Or declare it inline under the class's attributes".into(),
            ],
            Self::EmptySelection => vec![
                "Select at least one class when prompted".into(),
                "Or pass one or more --class flags".into(),
                "Run `gen-harmonizer classes <SCHEMA>` to see the candidates".into(),
            ],
            Self::ClassNotInSchema { class } => vec![
                format!("'{class}' is not a class of this schema"),
                "Run `gen-harmonizer classes <SCHEMA>` to see the candidates".into(),
            ],
            Self::NotACandidate { class } => vec![
                format!("'{class}' is the interface marker, not a template"),
                "Run `gen-harmonizer classes <SCHEMA>` to see the candidates".into(),
            ],
            Self::InvalidSchemaName { .. } => vec![
                "The schema's `name` becomes the file name under src/schemas".into(),
                "Use a plain name without path separators, e.g. `name: mpox`".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ImportCycle { .. }
            | Self::InheritanceCycle { .. }
            | Self::UnknownAncestor { .. }
            | Self::UnknownSlot { .. } => ErrorCategory::Validation,
            Self::EmptySelection => ErrorCategory::Validation,
            Self::ClassNotInSchema { .. } => ErrorCategory::NotFound,
            Self::NotACandidate { .. } | Self::InvalidSchemaName { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::SerializationFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
