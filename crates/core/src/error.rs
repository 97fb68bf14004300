//! Context-level error types
//!
//! This module defines the errors an implementation can observe while
//! reading or writing the facade's persistent context through the
//! [`StateContext`](crate::traits::StateContext) trait. We use `thiserror`
//! for automatic `Display` and `Error` trait implementations.

use crate::slots::ContextKeyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for context operations
pub type ContextResult<T> = std::result::Result<T, ContextError>;

/// Errors from context-store access
///
/// Forwarded calls receive these from `StateContext` methods; the facade
/// surfaces them to the original caller without interpretation.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextError {
    /// The key failed validation (empty, NUL, reserved prefix, too long)
    #[error("Invalid context key: {0}")]
    InvalidKey(#[from] ContextKeyError),

    /// Internal store failure
    #[error("Context store error: {0}")]
    Internal(String),
}

impl ContextError {
    /// Whether this error is the reserved-prefix rejection, i.e. an attempt
    /// to touch the facade's control slots from business code.
    pub fn is_reserved_key(&self) -> bool {
        matches!(self, ContextError::InvalidKey(ContextKeyError::ReservedPrefix))
    }

    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            ContextError::InvalidKey(e) => e.reason_code(),
            ContextError::Internal(_) => "context_internal",
        }
    }
}
