//! Core traits for implementations and the execution context
//!
//! This module defines the Implementation and StateContext traits that
//! enable swapping backing implementations without breaking the facade.
//!
//! The central design point is **execute-with-context**: a forwarded call
//! runs against the facade's persistent state, passed in explicitly as
//! `&dyn StateContext`, rather than against storage the implementation
//! owns. State written through the context outlives any implementation
//! swap.

use crate::error::ContextResult;
use crate::types::{Call, ImplementationId, Selector};
use crate::value::Value;
use crate::versioned::{Version, Versioned};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-description of a backing implementation
///
/// Returned by [`Implementation::descriptor`]. The `id` must match the
/// reference under which the implementation is registered; upgrade
/// validation checks this before adopting a new reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// The handle this implementation answers to
    pub id: ImplementationId,
    /// Human-readable version label (diagnostics only)
    pub version: String,
    /// The business selectors this implementation handles
    pub selectors: Vec<Selector>,
}

impl Descriptor {
    /// Create a descriptor
    pub fn new(id: ImplementationId, version: &str, selectors: Vec<Selector>) -> Self {
        Descriptor {
            id,
            version: version.to_string(),
            selectors,
        }
    }
}

/// A failure raised by an implementation during a forwarded call
///
/// The facade relays this to the original caller verbatim: it never
/// interprets, transforms, or recovers from it. `code` is the
/// implementation's own machine-readable discriminator; `detail` is an
/// arbitrary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFailure {
    /// Machine-readable failure discriminator
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Arbitrary failure payload
    pub detail: Value,
}

impl CallFailure {
    /// Create a failure with no detail payload
    pub fn new(code: &str, message: &str) -> Self {
        CallFailure {
            code: code.to_string(),
            message: message.to_string(),
            detail: Value::Null,
        }
    }

    /// Create a failure with a detail payload
    pub fn with_detail(code: &str, message: &str, detail: Value) -> Self {
        CallFailure {
            code: code.to_string(),
            message: message.to_string(),
            detail,
        }
    }
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CallFailure {}

/// Persistent-context abstraction handed to forwarded calls
///
/// Implementations read and write the facade's business-data region through
/// this trait. All keys are validated; the reserved control prefix is
/// rejected on every operation, so no implementation can reach the control
/// slots.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait StateContext: Send + Sync {
    /// Get the current value for a key (latest version)
    ///
    /// Returns None if the key has never been written or was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the store fails.
    fn get(&self, key: &str) -> ContextResult<Option<Versioned<Value>>>;

    /// Put a key-value pair
    ///
    /// Returns the context version assigned to this write. Versions are
    /// monotonically increasing and assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid (including the reserved
    /// prefix) or the store fails.
    fn put(&self, key: &str, value: Value) -> ContextResult<Version>;

    /// Delete a key
    ///
    /// Returns the deleted value if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the store fails.
    fn delete(&self, key: &str) -> ContextResult<Option<Versioned<Value>>>;

    /// Scan keys with the given prefix
    ///
    /// Results are sorted by key order. The prefix itself is validated like
    /// a key, so the reserved region can never be scanned from here either.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is invalid or the store fails.
    fn scan_prefix(&self, prefix: &str) -> ContextResult<Vec<(String, Versioned<Value>)>>;

    /// Get the current context version
    ///
    /// Returns the highest context version assigned so far.
    fn current_version(&self) -> u64;
}

/// A swappable backing implementation
///
/// The facade holds a reference to exactly one active implementation at a
/// time and forwards every non-administrative call to it. Implementations
/// are stateless with respect to business data: everything persistent goes
/// through the `StateContext` they are handed, which is how state survives
/// an upgrade.
///
/// Thread safety: the facade shares implementations across calls
/// (requires Send + Sync).
pub trait Implementation: Send + Sync {
    /// Self-description: id, version label, handled selectors
    fn descriptor(&self) -> Descriptor;

    /// Handle a forwarded call against the facade's persistent context
    ///
    /// The result or failure is relayed to the original caller unchanged.
    ///
    /// # Errors
    ///
    /// Returns the implementation's own `CallFailure` for business
    /// failures, including unrecognized selectors.
    fn handle(&self, call: &Call, ctx: &dyn StateContext) -> Result<Value, CallFailure>;
}
