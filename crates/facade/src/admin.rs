//! The administrative component.
//!
//! `Admin` owns the control state and is the only mutation path to it: the
//! facade reads the control pair to route calls but never writes it
//! directly. Every operation is gated on the caller being the current
//! admin; gate failures are terminal for that call and leave the control
//! state unchanged.

use crate::error::Error;
use crate::registry::Registry;
use std::sync::Arc;
use swivel_core::{Identity, ImplementationId, Versioned};
use swivel_state::{ControlPair, ControlState};

/// Holds administrative authority over a facade's control state.
///
/// The four public operations mirror the administrative selectors; they are
/// also directly callable by embedders that hold the facade natively. Reads
/// are taken from a single atomic snapshot, so the authorization check and
/// the returned value always describe the same control version.
pub struct Admin {
    control: ControlState,
    registry: Arc<Registry>,
}

impl Admin {
    pub(crate) fn new(control: ControlState, registry: Arc<Registry>) -> Self {
        Admin { control, registry }
    }

    /// Read the active implementation reference.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if `caller` is not the current admin.
    pub fn get_implementation(
        &self,
        caller: &Identity,
    ) -> Result<Versioned<ImplementationId>, Error> {
        let snapshot = self.control.snapshot();
        if snapshot.value.admin != *caller {
            return Err(self.unauthorized("admin/get_implementation", caller));
        }
        Ok(snapshot.map(|pair| pair.implementation))
    }

    /// Read the current admin identity.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if `caller` is not the current admin.
    pub fn get_admin(&self, caller: &Identity) -> Result<Versioned<Identity>, Error> {
        let snapshot = self.control.snapshot();
        if snapshot.value.admin != *caller {
            return Err(self.unauthorized("admin/get_admin", caller));
        }
        Ok(snapshot.map(|pair| pair.admin))
    }

    /// Transfer adminship to `new_admin`.
    ///
    /// On success the previous admin loses authority immediately; the
    /// returned snapshot is the new control pair.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if `caller` is not the current admin.
    pub fn change_admin(
        &self,
        caller: &Identity,
        new_admin: Identity,
    ) -> Result<Versioned<ControlPair>, Error> {
        match self.control.transfer_admin(caller, new_admin.clone()) {
            Ok(snapshot) => {
                tracing::info!(
                    previous_admin = %caller,
                    new_admin = %new_admin,
                    control_version = snapshot.version.as_u64(),
                    "admin_changed"
                );
                Ok(snapshot)
            }
            Err(_) => Err(self.unauthorized("admin/change_admin", caller)),
        }
    }

    /// Repoint the facade to `reference`.
    ///
    /// The target must resolve in the registry and its descriptor id must
    /// match the reference; validation happens before any state is touched,
    /// so a failed upgrade is invisible to readers.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if `caller` is not the current admin, or
    /// `InvalidTarget` if the reference is not usable.
    pub fn upgrade_implementation(
        &self,
        caller: &Identity,
        reference: ImplementationId,
    ) -> Result<Versioned<ControlPair>, Error> {
        // Authorization has precedence: an unauthorized caller learns
        // nothing about what is or is not registered.
        if !self.control.is_admin(caller) {
            return Err(self.unauthorized("admin/upgrade_implementation", caller));
        }

        let target = self.registry.resolve(&reference).ok_or_else(|| {
            Error::InvalidTarget {
                reference: reference.to_string(),
                reason: "unregistered".into(),
            }
        })?;
        let descriptor = target.descriptor();
        if descriptor.id != reference {
            return Err(Error::InvalidTarget {
                reference: reference.to_string(),
                reason: "descriptor_mismatch".into(),
            });
        }

        match self.control.repoint(caller, reference.clone()) {
            Ok(snapshot) => {
                tracing::info!(
                    admin = %caller,
                    reference = %reference,
                    implementation_version = %descriptor.version,
                    control_version = snapshot.version.as_u64(),
                    "implementation_upgraded"
                );
                Ok(snapshot)
            }
            // Adminship moved between the precheck and the gated write.
            Err(_) => Err(self.unauthorized("admin/upgrade_implementation", caller)),
        }
    }

    /// Current implementation reference, ungated (dispatch-internal).
    pub(crate) fn current_implementation(&self) -> Versioned<ImplementationId> {
        self.control.implementation()
    }

    /// Whether `caller` currently holds adminship (dispatch-internal).
    pub(crate) fn is_current_admin(&self, caller: &Identity) -> bool {
        self.control.is_admin(caller)
    }

    fn unauthorized(&self, selector: &str, caller: &Identity) -> Error {
        Error::Unauthorized {
            selector: selector.to_string(),
            caller: caller.to_string(),
        }
    }
}
