//! The facade's control state
//!
//! The control pair (active implementation reference + admin identity) is
//! the only mutable state the dispatch layer consults. It is modeled as a
//! single owned struct behind a single lock: a reader always sees a pair
//! that some completed mutation produced, never a half-updated combination.
//!
//! Mutations are gated: the caller's identity is compared against the
//! current admin *under the write lock*, so the authorization check and the
//! state transition are one linearizable step. A transfer of adminship and
//! a mutation attempt by the previous admin can interleave in either order,
//! but never overlap.

use parking_lot::RwLock;
use serde::Serialize;
use swivel_core::{Identity, ImplementationId, Version, Versioned};

/// The facade's control data: which implementation is active, who may
/// change it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlPair {
    /// Reference to the currently active implementation
    pub implementation: ImplementationId,
    /// Identity holding administrative authority
    pub admin: Identity,
}

/// Linearizable holder of the control pair
///
/// One lock guards the whole pair, so concurrent readers observe either the
/// pre-mutation or post-mutation state in full. The version starts at 1
/// (the construction itself is the first completed mutation) and increases
/// by exactly one per successful mutation. Failed mutations leave both the
/// pair and the version untouched.
pub struct ControlState {
    inner: RwLock<Versioned<ControlPair>>,
}

impl ControlState {
    /// Seed the control pair at construction
    ///
    /// Both fields are validated types, so the pair is well-formed by
    /// construction; whether the implementation reference actually resolves
    /// is the facade constructor's check.
    pub fn new(implementation: ImplementationId, admin: Identity) -> Self {
        ControlState {
            inner: RwLock::new(Versioned::new(
                ControlPair {
                    implementation,
                    admin,
                },
                Version::control(1),
            )),
        }
    }

    /// Read the full pair atomically
    pub fn snapshot(&self) -> Versioned<ControlPair> {
        self.inner.read().clone()
    }

    /// Read the active implementation reference
    pub fn implementation(&self) -> Versioned<ImplementationId> {
        self.snapshot().map(|pair| pair.implementation)
    }

    /// Read the current admin identity
    pub fn admin(&self) -> Versioned<Identity> {
        self.snapshot().map(|pair| pair.admin)
    }

    /// Whether `caller` currently holds adminship
    pub fn is_admin(&self, caller: &Identity) -> bool {
        self.inner.read().value.admin == *caller
    }

    /// Repoint the facade to a new implementation, if `caller` is the admin
    ///
    /// Total-state transition: the old reference is fully replaced, the
    /// admin field is untouched, and the version is bumped by one. On gate
    /// failure the state is untouched and the observed snapshot is returned
    /// as the error.
    pub fn repoint(
        &self,
        caller: &Identity,
        new: ImplementationId,
    ) -> Result<Versioned<ControlPair>, Versioned<ControlPair>> {
        let mut guard = self.inner.write();
        if guard.value.admin != *caller {
            return Err(guard.clone());
        }
        let next = Versioned::new(
            ControlPair {
                implementation: new,
                admin: guard.value.admin.clone(),
            },
            Version::control(guard.version.as_u64() + 1),
        );
        *guard = next.clone();
        Ok(next)
    }

    /// Transfer adminship to a new identity, if `caller` is the admin
    ///
    /// Same shape as [`repoint`]: the previous admin loses authority the
    /// instant the write lock releases; there is no grace window.
    ///
    /// [`repoint`]: ControlState::repoint
    pub fn transfer_admin(
        &self,
        caller: &Identity,
        new: Identity,
    ) -> Result<Versioned<ControlPair>, Versioned<ControlPair>> {
        let mut guard = self.inner.write();
        if guard.value.admin != *caller {
            return Err(guard.clone());
        }
        let next = Versioned::new(
            ControlPair {
                implementation: guard.value.implementation.clone(),
                admin: new,
            },
            Version::control(guard.version.as_u64() + 1),
        );
        *guard = next.clone();
        Ok(next)
    }
}
