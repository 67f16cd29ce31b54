//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Storage and
/// transport concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A candidate record failed one or more field rules.
    ///
    /// Every failing rule contributes one message; the display form joins them
    /// with `", "`.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation(errors)
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Individual rule messages for a validation failure (empty otherwise).
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Validation(errors) => errors,
            Self::InvalidId(_) => &[],
        }
    }
}
