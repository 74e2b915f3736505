//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic business failures live here: refused inputs and broken
/// invariants. Storage or transport failures belong to the crate that owns
/// that storage or transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an out-of-stock product).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant would be violated by the request.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Two records clash (e.g. duplicate catalog ids).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = DomainError::invariant("nothing to complete");
        assert_eq!(err.to_string(), "invariant violated: nothing to complete");

        let err = DomainError::validation("out of stock");
        assert_eq!(err.to_string(), "validation failed: out of stock");
    }

    #[test]
    fn invalid_id_and_conflict_messages() {
        assert_eq!(
            DomainError::invalid_id("ProductId: bad").to_string(),
            "invalid identifier: ProductId: bad"
        );
        assert_eq!(
            DomainError::conflict("duplicate product id 1").to_string(),
            "conflict: duplicate product id 1"
        );
    }
}
