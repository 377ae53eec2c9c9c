//! The error type returned across the core's public API.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for harmonizer-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HarmonizerError {
    /// Errors from the domain layer (resolution, selection, structure).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (ports and orchestration).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl HarmonizerError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Import cycles, inheritance cycles and unresolvable references.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_resolution())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type HarmonizerResult<T> = Result<T, HarmonizerError>;
