//! Domain error model.

use thiserror::Error;

use crate::code::ItemCode;
use crate::quantity::Quantity;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. An unknown
/// item code is not an error: it is reported as zero stock.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. negative quantity, blank code).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A reduction asked for more than all lots of a code hold together.
    #[error("insufficient stock for {code}: requested {requested}, available {available}")]
    InsufficientStock {
        code: ItemCode,
        requested: Quantity,
        available: Quantity,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn insufficient_stock(code: &ItemCode, requested: Quantity, available: Quantity) -> Self {
        Self::InsufficientStock {
            code: code.clone(),
            requested,
            available,
        }
    }
}
