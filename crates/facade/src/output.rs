//! Output enum for dispatch results.
//!
//! Every operation produces exactly one output type. This mapping is
//! deterministic: the same selector always produces the same output variant
//! (though the values differ based on control and context state).

use serde::{Deserialize, Serialize};
use swivel_core::{Identity, ImplementationId, Value, Version, Versioned};

/// Successful dispatch results.
///
/// Each operation maps to exactly one `Output` variant:
///
/// | Operation | Output |
/// |-----------|--------|
/// | forwarded business call | `Forwarded` |
/// | `admin/get_implementation` | `Implementation` |
/// | `admin/get_admin` | `Admin` |
/// | `admin/change_admin` | `ControlVersion` |
/// | `admin/upgrade_implementation` | `ControlVersion` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Result of a forwarded call, relayed verbatim from the implementation
    Forwarded(Value),

    /// The active implementation reference, with the control version that
    /// produced it
    Implementation(Versioned<ImplementationId>),

    /// The current admin identity, with the control version that produced it
    Admin(Versioned<Identity>),

    /// The control version created by a completed admin mutation
    ControlVersion(Version),
}

impl Output {
    /// Get the forwarded value, if this is a `Forwarded` output
    pub fn as_forwarded(&self) -> Option<&Value> {
        match self {
            Output::Forwarded(v) => Some(v),
            _ => None,
        }
    }
}
