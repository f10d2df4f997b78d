//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Reconciliation itself is total over well-formed snapshots, so these errors
/// only surface at the edges: configuration and record identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an out-of-range setting).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = DomainError::validation("dimension_precision must be <= 9");
        assert_eq!(
            err.to_string(),
            "validation failed: dimension_precision must be <= 9"
        );

        let err = DomainError::invalid_id("RecordId: bad");
        assert_eq!(err.to_string(), "invalid identifier: RecordId: bad");
    }
}
