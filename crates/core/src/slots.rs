//! Control slot layout and context-key validation
//!
//! The facade's control data (the active implementation reference and the
//! admin identity) lives in two named, fixed slots. Forwarded calls execute
//! against the facade's persistent context, so an implementation whose
//! ordinary key layout collided with those slots could corrupt the control
//! state. The layout here makes that impossible: the two slots live under a
//! reserved prefix, and every write into the context validates that the key
//! does not use it. Disjointness is asserted on each write, not assumed.
//!
//! ## Contract
//!
//! After stabilization, the slot names and validation rules are FROZEN:
//! - Context keys must be valid UTF-8 (guaranteed by Rust's &str type)
//! - Context keys must not be empty
//! - Context keys must not contain NUL bytes (\0)
//! - Context keys must not start with the reserved prefix `_swivel/`
//! - Context keys must not exceed `max_context_key_bytes` (default: 1024)

use crate::limits::Limits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved prefix for the facade's own control slots
pub const RESERVED_PREFIX: &str = "_swivel/";

/// Slot name under which the active implementation reference is addressed
pub const SLOT_IMPLEMENTATION: &str = "_swivel/implementation";

/// Slot name under which the admin identity is addressed
pub const SLOT_ADMIN: &str = "_swivel/admin";

/// Validate a context key using default limits
///
/// This is the primary validation function for the context store. Every
/// write path into the facade's persistent context goes through it.
///
/// # Examples
///
/// ```
/// use swivel_core::slots::validate_context_key;
///
/// // Valid keys
/// assert!(validate_context_key("odometer").is_ok());
/// assert!(validate_context_key("trip/current").is_ok());
///
/// // Invalid keys
/// assert!(validate_context_key("").is_err()); // empty
/// assert!(validate_context_key("_swivel/implementation").is_err()); // reserved
/// ```
pub fn validate_context_key(key: &str) -> Result<(), ContextKeyError> {
    validate_context_key_with_limits(key, &Limits::default())
}

/// Validate a context key with custom limits
pub fn validate_context_key_with_limits(
    key: &str,
    limits: &Limits,
) -> Result<(), ContextKeyError> {
    // Rule 1: Key cannot be empty
    if key.is_empty() {
        return Err(ContextKeyError::Empty);
    }

    // Rule 2: Key cannot contain NUL bytes
    if key.contains('\x00') {
        return Err(ContextKeyError::ContainsNul);
    }

    // Rule 3: Key cannot use the reserved control prefix
    if key.starts_with(RESERVED_PREFIX) {
        return Err(ContextKeyError::ReservedPrefix);
    }

    // Rule 4: Key cannot exceed max length
    let len = key.len();
    if len > limits.max_context_key_bytes {
        return Err(ContextKeyError::TooLong {
            actual: len,
            max: limits.max_context_key_bytes,
        });
    }

    Ok(())
}

/// Context key validation errors
///
/// These errors map to the `invalid_context_key` error code in the wire
/// protocol; `ReservedPrefix` is the asserted control/business boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextKeyError {
    /// Key is empty (length 0)
    #[error("Context key cannot be empty")]
    Empty,

    /// Key contains NUL byte (\0)
    #[error("Context key cannot contain NUL bytes")]
    ContainsNul,

    /// Key uses the reserved control prefix `_swivel/`
    #[error("Context key cannot use reserved prefix '{}'", RESERVED_PREFIX)]
    ReservedPrefix,

    /// Key exceeds maximum length
    #[error("Context key too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual key length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

impl ContextKeyError {
    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            ContextKeyError::Empty => "empty_context_key",
            ContextKeyError::ContainsNul => "contains_nul",
            ContextKeyError::ReservedPrefix => "reserved_prefix",
            ContextKeyError::TooLong { .. } => "context_key_too_long",
        }
    }
}
