//! Error types for call dispatch.
//!
//! All errors from [`Facade::invoke`](crate::Facade::invoke) are represented
//! by the [`Error`] enum. These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Terminal**: No error is retried or queued; a failing operation
//!   leaves the control state unchanged
//!
//! Construction-time failures have their own type, [`ConfigError`]: a
//! facade without a valid initial implementation and admin identity must
//! not come into existence at all.

use serde::{Deserialize, Serialize};
use swivel_core::{CallFailure, ContextError};

/// Call dispatch errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Authorization | `Unauthorized` | Caller is not the current admin |
/// | Upgrade | `InvalidTarget` | Proposed implementation is unusable |
/// | Decoding | `MalformedCall`, `InvalidPayload` | Bad inbound call |
/// | Forwarding | `Forwarded` | Implementation failure, relayed verbatim |
/// | Context | `Context` | Context-store failure during a forwarded call |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Caller is not the current admin for an administrative operation
    /// (or hit an administrative selector under the `Reject` clash policy).
    #[error("unauthorized: caller '{caller}' may not invoke '{selector}'")]
    Unauthorized {
        /// The administrative selector that was invoked
        selector: String,
        /// The rejected caller identity
        caller: String,
    },

    /// Proposed upgrade target is not usable
    #[error("invalid upgrade target '{reference}': {reason}")]
    InvalidTarget {
        /// The rejected implementation reference
        reference: String,
        /// Reason code (`unregistered`, `descriptor_mismatch`)
        reason: String,
    },

    /// Administrative call payload could not be decoded
    #[error("malformed call '{selector}': {reason}")]
    MalformedCall {
        /// The administrative selector that was invoked
        selector: String,
        /// What was wrong with the payload
        reason: String,
    },

    /// Inbound payload violates size limits
    #[error("payload rejected ({reason}): {actual} exceeds maximum {max}")]
    InvalidPayload {
        /// Reason code for the violation
        reason: String,
        /// Actual size
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Failure raised by the active implementation, relayed verbatim
    #[error("forwarded call '{selector}' failed: {failure}")]
    Forwarded {
        /// The forwarded selector
        selector: String,
        /// The implementation's failure, unchanged
        failure: CallFailure,
    },

    /// Context-store failure surfaced from a forwarded call
    #[error("context error: {0}")]
    Context(#[from] ContextError),
}

impl Error {
    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            Error::Unauthorized { .. } => "unauthorized",
            Error::InvalidTarget { .. } => "invalid_target",
            Error::MalformedCall { .. } => "malformed_call",
            Error::InvalidPayload { .. } => "invalid_payload",
            Error::Forwarded { .. } => "forwarded_failure",
            Error::Context(e) => e.reason_code(),
        }
    }
}

/// Facade construction errors.
///
/// Construction must not succeed without a usable initial implementation;
/// the initial admin identity is already guaranteed well-formed by the
/// `Identity` type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ConfigError {
    /// The initial implementation reference does not resolve in the registry
    #[error("initial implementation '{reference}' is not registered")]
    UnknownImplementation {
        /// The unresolvable reference
        reference: String,
    },

    /// The resolved implementation reports a different id than it was
    /// registered under
    #[error("implementation '{reference}' reports descriptor id '{actual}'")]
    DescriptorMismatch {
        /// The reference used for the lookup
        reference: String,
        /// The id the implementation's descriptor reported
        actual: String,
    },
}
