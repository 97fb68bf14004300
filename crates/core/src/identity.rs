//! Identity validation for swivel
//!
//! This module defines the caller/admin identity type and its validation
//! rules, enforced at every type boundary (construction, deserialization).
//!
//! ## Contract
//!
//! After stabilization, these validation rules are FROZEN:
//! - Identities must be valid UTF-8 (guaranteed by Rust's &str type)
//! - Identities must not be empty
//! - Identities must not contain NUL bytes (\0)
//! - Identities must not exceed `max_identity_bytes` (default: 256)
//!
//! Because the empty identity is unconstructible, "the zero identity" can
//! never hold or acquire adminship.

use crate::limits::Limits;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A caller or admin identity
///
/// The facade trusts this value as authentic; verifying authenticity is the
/// transport's responsibility. Authorization compares identities for exact
/// equality.
///
/// # Examples
///
/// ```
/// use swivel_core::Identity;
///
/// // Valid identities
/// assert!(Identity::new("alice").is_ok());
/// assert!(Identity::new("svc:deployer").is_ok());
///
/// // Invalid identities
/// assert!(Identity::new("").is_err()); // empty
/// assert!(Identity::new("a\x00b").is_err()); // contains NUL
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Create an identity, validating against default limits
    ///
    /// This is the primary validation path for user-facing APIs.
    pub fn new(identity: &str) -> Result<Self, IdentityError> {
        Self::with_limits(identity, &Limits::default())
    }

    /// Create an identity with custom limits
    ///
    /// This is useful when the facade is constructed with custom limits.
    pub fn with_limits(identity: &str, limits: &Limits) -> Result<Self, IdentityError> {
        // Rule 1: Identity cannot be empty
        if identity.is_empty() {
            return Err(IdentityError::Empty);
        }

        // Rule 2: Identity cannot contain NUL bytes
        if identity.contains('\x00') {
            return Err(IdentityError::ContainsNul);
        }

        // Rule 3: Identity cannot exceed max length
        let len = identity.len();
        if len > limits.max_identity_bytes {
            return Err(IdentityError::TooLong {
                actual: len,
                max: limits.max_identity_bytes,
            });
        }

        // Note: UTF-8 validity is guaranteed by Rust's &str type

        Ok(Identity(identity.to_string()))
    }

    /// The identity string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identity::new(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Identity::new(&s)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.0
    }
}

/// Identity validation errors
///
/// These errors map to the `invalid_identity` error code in the wire protocol.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Identity is empty (length 0)
    #[error("Identity cannot be empty")]
    Empty,

    /// Identity contains NUL byte (\0)
    #[error("Identity cannot contain NUL bytes")]
    ContainsNul,

    /// Identity exceeds maximum length
    #[error("Identity too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual identity length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

impl IdentityError {
    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            IdentityError::Empty => "empty_identity",
            IdentityError::ContainsNul => "contains_nul",
            IdentityError::TooLong { .. } => "identity_too_long",
        }
    }
}
