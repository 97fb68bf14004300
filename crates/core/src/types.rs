//! Core types for swivel
//!
//! This module defines the foundational call types:
//! - Selector: operation discriminator for inbound calls
//! - ImplementationId: opaque handle naming a backing implementation
//! - CallId: unique correlation id stamped on each inbound call
//! - Call: an inbound invocation (selector + payload + caller identity)

use crate::identity::Identity;
use crate::limits::Limits;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Prefix shared by all administrative selectors
pub const ADMIN_SELECTOR_PREFIX: &str = "admin/";

/// Administrative selector: read the active implementation reference
pub const ADMIN_SELECTOR_GET_IMPLEMENTATION: &str = "admin/get_implementation";

/// Administrative selector: read the current admin identity
pub const ADMIN_SELECTOR_GET_ADMIN: &str = "admin/get_admin";

/// Administrative selector: transfer adminship to a new identity
pub const ADMIN_SELECTOR_CHANGE_ADMIN: &str = "admin/change_admin";

/// Administrative selector: repoint the facade to a new implementation
pub const ADMIN_SELECTOR_UPGRADE_IMPLEMENTATION: &str = "admin/upgrade_implementation";

/// The closed administrative surface.
///
/// These selector strings are part of the external interface and MUST NOT
/// be renamed or renumbered after deployment. Dispatch checks this set
/// before forwarding anything to the active implementation.
pub const ADMIN_SELECTORS: [&str; 4] = [
    ADMIN_SELECTOR_GET_IMPLEMENTATION,
    ADMIN_SELECTOR_GET_ADMIN,
    ADMIN_SELECTOR_CHANGE_ADMIN,
    ADMIN_SELECTOR_UPGRADE_IMPLEMENTATION,
];

/// Operation discriminator for an inbound call
///
/// A selector names which operation a call targets. Administrative and
/// forwarded selectors share one namespace; the four administrative
/// selectors live under the `admin/` prefix, and the rest of that prefix
/// is reserved so future administrative operations cannot collide with
/// business selectors.
///
/// ## Contract
///
/// After stabilization, these validation rules are FROZEN:
/// - Selectors must not be empty
/// - Selectors must not contain NUL bytes (\0)
/// - Selectors under `admin/` must be one of the four administrative
///   selectors exactly
/// - Selectors must not exceed `max_selector_bytes` (default: 256)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector(String);

impl Selector {
    /// Create a selector, validating against default limits
    pub fn new(selector: &str) -> Result<Self, SelectorError> {
        Self::with_limits(selector, &Limits::default())
    }

    /// Create a selector with custom limits
    pub fn with_limits(selector: &str, limits: &Limits) -> Result<Self, SelectorError> {
        if selector.is_empty() {
            return Err(SelectorError::Empty);
        }
        if selector.contains('\x00') {
            return Err(SelectorError::ContainsNul);
        }
        if selector.starts_with(ADMIN_SELECTOR_PREFIX)
            && !ADMIN_SELECTORS.contains(&selector)
        {
            return Err(SelectorError::ReservedPrefix);
        }
        let len = selector.len();
        if len > limits.max_selector_bytes {
            return Err(SelectorError::TooLong {
                actual: len,
                max: limits.max_selector_bytes,
            });
        }
        Ok(Selector(selector.to_string()))
    }

    /// The selector string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this selector is one of the four administrative selectors
    pub fn is_administrative(&self) -> bool {
        ADMIN_SELECTORS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::new(s)
    }
}

impl TryFrom<String> for Selector {
    type Error = SelectorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Selector::new(&s)
    }
}

impl From<Selector> for String {
    fn from(s: Selector) -> Self {
        s.0
    }
}

/// Selector validation errors
///
/// These errors map to the `malformed_call` error code in the wire protocol.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// Selector is empty (length 0)
    #[error("Selector cannot be empty")]
    Empty,

    /// Selector contains NUL byte (\0)
    #[error("Selector cannot contain NUL bytes")]
    ContainsNul,

    /// Selector squats on the reserved administrative prefix
    #[error("Selector cannot use reserved prefix '{}'", ADMIN_SELECTOR_PREFIX)]
    ReservedPrefix,

    /// Selector exceeds maximum length
    #[error("Selector too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual selector length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

impl SelectorError {
    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            SelectorError::Empty => "empty_selector",
            SelectorError::ContainsNul => "contains_nul",
            SelectorError::ReservedPrefix => "reserved_selector_prefix",
            SelectorError::TooLong { .. } => "selector_too_long",
        }
    }
}

/// Opaque handle naming a registered backing implementation
///
/// An `ImplementationId` is how the facade's control state refers to the
/// currently active implementation. The handle carries no behavior; it is
/// resolved against the registry on every forwarded call.
///
/// ## Contract
///
/// After stabilization, these validation rules are FROZEN:
/// - Ids must not be empty
/// - Ids must not contain NUL bytes (\0)
/// - Ids must not exceed `max_identity_bytes` (default: 256)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImplementationId(String);

impl ImplementationId {
    /// Create an implementation id, validating against default limits
    pub fn new(id: &str) -> Result<Self, ImplementationIdError> {
        Self::with_limits(id, &Limits::default())
    }

    /// Create an implementation id with custom limits
    pub fn with_limits(id: &str, limits: &Limits) -> Result<Self, ImplementationIdError> {
        if id.is_empty() {
            return Err(ImplementationIdError::Empty);
        }
        if id.contains('\x00') {
            return Err(ImplementationIdError::ContainsNul);
        }
        let len = id.len();
        if len > limits.max_identity_bytes {
            return Err(ImplementationIdError::TooLong {
                actual: len,
                max: limits.max_identity_bytes,
            });
        }
        Ok(ImplementationId(id.to_string()))
    }

    /// The id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ImplementationId {
    type Err = ImplementationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImplementationId::new(s)
    }
}

impl TryFrom<String> for ImplementationId {
    type Error = ImplementationIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ImplementationId::new(&s)
    }
}

impl From<ImplementationId> for String {
    fn from(id: ImplementationId) -> Self {
        id.0
    }
}

/// Implementation id validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImplementationIdError {
    /// Id is empty (length 0)
    #[error("Implementation id cannot be empty")]
    Empty,

    /// Id contains NUL byte (\0)
    #[error("Implementation id cannot contain NUL bytes")]
    ContainsNul,

    /// Id exceeds maximum length
    #[error("Implementation id too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual id length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

impl ImplementationIdError {
    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            ImplementationIdError::Empty => "empty_implementation_id",
            ImplementationIdError::ContainsNul => "contains_nul",
            ImplementationIdError::TooLong { .. } => "implementation_id_too_long",
        }
    }
}

/// Unique correlation id for an inbound call
///
/// A CallId is a wrapper around a UUID v4, stamped on each call when it is
/// constructed. It exists for log correlation only; dispatch never branches
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(Uuid);

impl CallId {
    /// Create a new random CallId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a CallId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inbound invocation
///
/// A call carries everything dispatch needs: which operation is targeted
/// (`selector`), the operation's input (`payload`), and who is calling
/// (`caller`). Calls are transient and never persisted.
///
/// The `caller` identity is trusted as authentic; verifying authenticity is
/// the transport's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Correlation id, stamped at construction; wire calls that omit it
    /// get a fresh one at decode time
    #[serde(default)]
    pub id: CallId,
    /// Which operation this call targets
    pub selector: Selector,
    /// Operation input
    pub payload: Value,
    /// Caller identity, as supplied by the transport
    pub caller: Identity,
}

impl Call {
    /// Create a call with a fresh correlation id
    pub fn new(selector: Selector, payload: Value, caller: Identity) -> Self {
        Call {
            id: CallId::new(),
            selector,
            payload,
            caller,
        }
    }
}
