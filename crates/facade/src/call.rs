//! The closed administrative surface.
//!
//! The four administrative operations form the "instruction set" of the
//! admin component. Decoding is strict: unknown payload fields are
//! rejected, so a renamed or misspelled field can never be silently
//! ignored and later corrupt a control transition.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use swivel_core::{
    Call, Identity, ImplementationId, Value, ADMIN_SELECTOR_CHANGE_ADMIN,
    ADMIN_SELECTOR_GET_ADMIN, ADMIN_SELECTOR_GET_IMPLEMENTATION,
    ADMIN_SELECTOR_UPGRADE_IMPLEMENTATION,
};

/// A decoded administrative operation.
///
/// This is the closed set checked before any forwarding happens. Each
/// variant corresponds to exactly one frozen selector; see
/// [`ADMIN_SELECTORS`](swivel_core::ADMIN_SELECTORS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminCall {
    /// Read the active implementation reference.
    /// Returns: `Output::Implementation`
    GetImplementation,

    /// Read the current admin identity.
    /// Returns: `Output::Admin`
    GetAdmin,

    /// Transfer adminship to a new identity.
    /// Returns: `Output::ControlVersion`
    ChangeAdmin {
        /// The identity receiving adminship
        new_admin: Identity,
    },

    /// Repoint the facade to a new implementation.
    /// Returns: `Output::ControlVersion`
    UpgradeImplementation {
        /// The reference to adopt
        reference: ImplementationId,
    },
}

impl AdminCall {
    /// Decode a call against the administrative surface.
    ///
    /// Returns `Ok(None)` when the selector is not administrative (the call
    /// should be forwarded). Returns `Err(Error::MalformedCall)` when the
    /// selector is administrative but the payload does not decode.
    pub fn decode(call: &Call) -> Result<Option<AdminCall>, Error> {
        let decoded = match call.selector.as_str() {
            ADMIN_SELECTOR_GET_IMPLEMENTATION => {
                Self::expect_empty_payload(call)?;
                AdminCall::GetImplementation
            }
            ADMIN_SELECTOR_GET_ADMIN => {
                Self::expect_empty_payload(call)?;
                AdminCall::GetAdmin
            }
            ADMIN_SELECTOR_CHANGE_ADMIN => {
                let raw = Self::expect_string_field(call, "new_admin")?;
                let new_admin = Identity::new(raw).map_err(|e| Error::MalformedCall {
                    selector: call.selector.to_string(),
                    reason: e.reason_code().to_string(),
                })?;
                AdminCall::ChangeAdmin { new_admin }
            }
            ADMIN_SELECTOR_UPGRADE_IMPLEMENTATION => {
                let raw = Self::expect_string_field(call, "reference")?;
                let reference =
                    ImplementationId::new(raw).map_err(|e| Error::MalformedCall {
                        selector: call.selector.to_string(),
                        reason: e.reason_code().to_string(),
                    })?;
                AdminCall::UpgradeImplementation { reference }
            }
            _ => return Ok(None),
        };
        Ok(Some(decoded))
    }

    /// The read operations take no payload: Null or an empty object.
    fn expect_empty_payload(call: &Call) -> Result<(), Error> {
        match &call.payload {
            Value::Null => Ok(()),
            Value::Object(o) if o.is_empty() => Ok(()),
            other => Err(Error::MalformedCall {
                selector: call.selector.to_string(),
                reason: format!("expected no payload, got {}", other.type_name()),
            }),
        }
    }

    /// The write operations take an object with exactly one string field.
    fn expect_string_field<'a>(call: &'a Call, field: &str) -> Result<&'a str, Error> {
        let malformed = |reason: String| Error::MalformedCall {
            selector: call.selector.to_string(),
            reason,
        };

        let obj = call
            .payload
            .as_object()
            .ok_or_else(|| malformed(format!(
                "expected object payload, got {}",
                call.payload.type_name()
            )))?;

        if obj.len() != 1 {
            return Err(malformed(format!(
                "expected exactly one field '{field}', got {} fields",
                obj.len()
            )));
        }

        obj.get(field)
            .ok_or_else(|| malformed(format!("missing field '{field}'")))?
            .as_str()
            .ok_or_else(|| malformed(format!("field '{field}' must be a string")))
    }
}
