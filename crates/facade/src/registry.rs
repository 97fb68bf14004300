//! The set of known backing implementations.
//!
//! The registry is the deployment environment's view of "what exists": an
//! append-only map from implementation references to live implementations.
//! An upgrade target is usable exactly when it resolves here and its
//! descriptor agrees with the reference it was registered under.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use swivel_core::{Implementation, ImplementationId};

/// Append-only map of registered implementations.
///
/// Registration happens before facade construction (and may continue
/// afterwards to stage upgrade targets); removal is not supported, so a
/// reference adopted by a live facade can never dangle.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<ImplementationId, Arc<dyn Implementation>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation under its descriptor id
    ///
    /// Returns the id the implementation was registered under.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateId` if an implementation is already
    /// registered under the same id.
    pub fn register(
        &mut self,
        implementation: Arc<dyn Implementation>,
    ) -> Result<ImplementationId, RegistryError> {
        let id = implementation.descriptor().id;
        if self.entries.contains_key(&id) {
            return Err(RegistryError::DuplicateId {
                id: id.to_string(),
            });
        }
        self.entries.insert(id.clone(), implementation);
        Ok(id)
    }

    /// Resolve a reference to a live implementation
    pub fn resolve(&self, id: &ImplementationId) -> Option<Arc<dyn Implementation>> {
        self.entries.get(id).cloned()
    }

    /// Whether a reference is registered
    pub fn contains(&self, id: &ImplementationId) -> bool {
        self.entries.contains_key(id)
    }

    /// All registered references, in sorted order
    pub fn ids(&self) -> Vec<ImplementationId> {
        self.entries.keys().cloned().collect()
    }

    /// Number of registered implementations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registration errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RegistryError {
    /// An implementation is already registered under this id
    #[error("implementation '{id}' is already registered")]
    DuplicateId {
        /// The colliding id
        id: String,
    },
}
