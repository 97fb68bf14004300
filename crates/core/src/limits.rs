//! Size limits for identities, selectors, keys, and payloads
//!
//! This module defines configurable size limits enforced at the facade
//! boundary and by the context store. Violations result in validation
//! errors with reason codes.
//!
//! ## Contract
//!
//! After stabilization, the default limits are FROZEN and cannot change
//! without a major version bump. Custom limits can be set at facade
//! construction time.

use crate::value::Value;
use thiserror::Error;

/// Size limits enforced at the facade boundary
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum selector length in bytes (default: 256)
    pub max_selector_bytes: usize,

    /// Maximum identity / implementation-id length in bytes (default: 256)
    pub max_identity_bytes: usize,

    /// Maximum context key length in bytes (default: 1024)
    pub max_context_key_bytes: usize,

    /// Maximum string length in bytes inside a payload (default: 1MB)
    pub max_string_bytes: usize,

    /// Maximum bytes length inside a payload (default: 1MB)
    pub max_bytes_len: usize,

    /// Maximum array length inside a payload (default: 64K elements)
    pub max_array_len: usize,

    /// Maximum object entries inside a payload (default: 64K entries)
    pub max_object_entries: usize,

    /// Maximum payload nesting depth (default: 64)
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_selector_bytes: 256,
            max_identity_bytes: 256,
            max_context_key_bytes: 1024,
            max_string_bytes: 1024 * 1024, // 1MB
            max_bytes_len: 1024 * 1024,    // 1MB
            max_array_len: 65_536,
            max_object_entries: 65_536,
            max_nesting_depth: 64,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// This is useful for unit tests that need to test limit enforcement
    /// without creating extremely large values.
    pub fn with_small_limits() -> Self {
        Limits {
            max_selector_bytes: 32,
            max_identity_bytes: 32,
            max_context_key_bytes: 64,
            max_string_bytes: 100,
            max_bytes_len: 100,
            max_array_len: 10,
            max_object_entries: 10,
            max_nesting_depth: 4,
        }
    }

    /// Validate a payload against size limits
    ///
    /// This validates:
    /// - String length
    /// - Bytes length
    /// - Array length
    /// - Object entries count
    /// - Nesting depth (recursive)
    pub fn validate_payload(&self, value: &Value) -> Result<(), LimitError> {
        self.validate_payload_impl(value, 0)
    }

    fn validate_payload_impl(&self, value: &Value, depth: usize) -> Result<(), LimitError> {
        if depth > self.max_nesting_depth {
            return Err(LimitError::NestingTooDeep {
                actual: depth,
                max: self.max_nesting_depth,
            });
        }

        match value {
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => Ok(()),

            Value::String(s) => {
                if s.len() > self.max_string_bytes {
                    return Err(LimitError::PayloadTooLarge {
                        reason: "string_too_long",
                        actual: s.len(),
                        max: self.max_string_bytes,
                    });
                }
                Ok(())
            }

            Value::Bytes(b) => {
                if b.len() > self.max_bytes_len {
                    return Err(LimitError::PayloadTooLarge {
                        reason: "bytes_too_long",
                        actual: b.len(),
                        max: self.max_bytes_len,
                    });
                }
                Ok(())
            }

            Value::Array(arr) => {
                if arr.len() > self.max_array_len {
                    return Err(LimitError::PayloadTooLarge {
                        reason: "array_too_long",
                        actual: arr.len(),
                        max: self.max_array_len,
                    });
                }
                for v in arr {
                    self.validate_payload_impl(v, depth + 1)?;
                }
                Ok(())
            }

            Value::Object(obj) => {
                if obj.len() > self.max_object_entries {
                    return Err(LimitError::PayloadTooLarge {
                        reason: "object_too_many_entries",
                        actual: obj.len(),
                        max: self.max_object_entries,
                    });
                }
                for v in obj.values() {
                    self.validate_payload_impl(v, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Limit validation errors
#[derive(Debug, Error)]
pub enum LimitError {
    /// Payload component exceeds size limits
    #[error("Payload too large ({reason}): {actual} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Reason code for the violation
        reason: &'static str,
        /// Actual size
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Payload nesting exceeds maximum depth
    #[error("Nesting too deep: {actual} levels exceeds maximum {max}")]
    NestingTooDeep {
        /// Actual nesting depth
        actual: usize,
        /// Maximum allowed depth
        max: usize,
    },
}

impl LimitError {
    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::PayloadTooLarge { .. } => "payload_too_large",
            LimitError::NestingTooDeep { .. } => "nesting_too_deep",
        }
    }
}
