//! The Facade - single entry point for all inbound calls.
//!
//! The Facade is a pure dispatcher over the persistent control state: it
//! has no phase machine of its own. On each call it checks the closed
//! administrative surface first, then forwards everything else to the
//! currently active implementation, executing against the facade's own
//! persistent context.

use crate::admin::Admin;
use crate::call::AdminCall;
use crate::error::{ConfigError, Error};
use crate::options::{ClashPolicy, FacadeOptions};
use crate::output::Output;
use crate::registry::Registry;
use crate::Result;
use std::sync::Arc;
use swivel_core::{Call, Identity, ImplementationId, LimitError};
use swivel_state::{ContextStore, ControlState};

/// The stable entry point of the delegation pattern.
///
/// A `Facade` holds the registry of known implementations, the admin
/// component (which owns the control state), and the persistent context
/// that forwarded calls execute against. The facade itself never mutates
/// control state; all writes go through [`Admin`].
///
/// # Thread Safety
///
/// `Facade` is `Send + Sync` and processes each call to completion; the
/// control pair and the context store serialize access internally.
///
/// # Example
///
/// ```ignore
/// use swivel_facade::{Call, Facade, FacadeOptions, Identity, Registry, Value};
/// use std::sync::Arc;
///
/// let mut registry = Registry::new();
/// let v1 = registry.register(Arc::new(CarV1))?;
///
/// let facade = Facade::new(
///     Arc::new(registry),
///     v1,
///     Identity::new("alice")?,
///     FacadeOptions::new(),
/// )?;
///
/// let out = facade.invoke(Call::new(
///     "car/drive".parse()?,
///     Value::Null,
///     Identity::new("anyone")?,
/// ))?;
/// ```
pub struct Facade {
    registry: Arc<Registry>,
    admin: Admin,
    context: ContextStore,
    options: FacadeOptions,
}

impl Facade {
    /// Construct a facade over a registry with an initial implementation
    /// and admin identity.
    ///
    /// The control pair is seeded at control version 1. Construction fails
    /// if the initial implementation does not resolve in the registry or
    /// reports a mismatched descriptor id; a facade without a usable
    /// implementation never comes into existence.
    pub fn new(
        registry: Arc<Registry>,
        initial_implementation: ImplementationId,
        initial_admin: Identity,
        options: FacadeOptions,
    ) -> std::result::Result<Self, ConfigError> {
        let target = registry.resolve(&initial_implementation).ok_or_else(|| {
            ConfigError::UnknownImplementation {
                reference: initial_implementation.to_string(),
            }
        })?;
        let descriptor = target.descriptor();
        if descriptor.id != initial_implementation {
            return Err(ConfigError::DescriptorMismatch {
                reference: initial_implementation.to_string(),
                actual: descriptor.id.to_string(),
            });
        }

        let control = ControlState::new(initial_implementation.clone(), initial_admin.clone());
        tracing::info!(
            implementation = %initial_implementation,
            admin = %initial_admin,
            "facade_constructed"
        );

        Ok(Facade {
            admin: Admin::new(control, Arc::clone(&registry)),
            registry,
            context: ContextStore::with_limits(options.limits.clone()),
            options,
        })
    }

    /// Dispatch a single inbound call.
    ///
    /// Administrative selectors from the current admin go to the [`Admin`]
    /// component; administrative selectors from anyone else follow the
    /// configured [`ClashPolicy`]; everything else is forwarded unmodified
    /// to the active implementation and its result or failure is relayed
    /// verbatim.
    pub fn invoke(&self, call: Call) -> Result<Output> {
        if let Err(e) = self.options.limits.validate_payload(&call.payload) {
            return Err(match e {
                LimitError::PayloadTooLarge { reason, actual, max } => Error::InvalidPayload {
                    reason: reason.to_string(),
                    actual,
                    max,
                },
                LimitError::NestingTooDeep { actual, max } => Error::InvalidPayload {
                    reason: "nesting_too_deep".to_string(),
                    actual,
                    max,
                },
            });
        }

        if call.selector.is_administrative() {
            // The identity branch comes first: a non-admin caller is never
            // shown the administrative surface, not even its decode errors.
            if self.admin.is_current_admin(&call.caller) {
                return self.dispatch_admin(&call);
            }
            match self.options.clash_policy {
                ClashPolicy::Forward => {}
                ClashPolicy::Reject => {
                    return Err(Error::Unauthorized {
                        selector: call.selector.to_string(),
                        caller: call.caller.to_string(),
                    })
                }
            }
        }

        self.forward(&call)
    }

    /// Dispatch a batch of calls sequentially, in order.
    ///
    /// Each call is independent: a failure is recorded in its slot and the
    /// batch continues.
    pub fn invoke_many(&self, calls: Vec<Call>) -> Vec<Result<Output>> {
        calls.into_iter().map(|call| self.invoke(call)).collect()
    }

    /// The administrative component, for native (non-call) access.
    pub fn admin(&self) -> &Admin {
        &self.admin
    }

    /// The facade's persistent context, for diagnostics and tests.
    pub fn context(&self) -> &ContextStore {
        &self.context
    }

    fn dispatch_admin(&self, call: &Call) -> Result<Output> {
        // decode() cannot return None here: is_administrative() matched.
        let admin_call = AdminCall::decode(call)?.ok_or_else(|| Error::MalformedCall {
            selector: call.selector.to_string(),
            reason: "not an administrative selector".into(),
        })?;

        tracing::debug!(
            call_id = %call.id,
            selector = %call.selector,
            caller = %call.caller,
            "admin_dispatch"
        );

        match admin_call {
            AdminCall::GetImplementation => self
                .admin
                .get_implementation(&call.caller)
                .map(Output::Implementation),
            AdminCall::GetAdmin => self.admin.get_admin(&call.caller).map(Output::Admin),
            AdminCall::ChangeAdmin { new_admin } => self
                .admin
                .change_admin(&call.caller, new_admin)
                .map(|snapshot| Output::ControlVersion(snapshot.version)),
            AdminCall::UpgradeImplementation { reference } => self
                .admin
                .upgrade_implementation(&call.caller, reference)
                .map(|snapshot| Output::ControlVersion(snapshot.version)),
        }
    }

    fn forward(&self, call: &Call) -> Result<Output> {
        // Resolve the reference at call time: an upgrade completed before
        // this call must be visible to it, with no stale caching.
        let reference = self.admin.current_implementation();
        let implementation =
            self.registry
                .resolve(&reference.value)
                .ok_or_else(|| Error::InvalidTarget {
                    reference: reference.value.to_string(),
                    reason: "unregistered".into(),
                })?;

        tracing::debug!(
            call_id = %call.id,
            selector = %call.selector,
            implementation = %reference.value,
            "forward"
        );

        match implementation.handle(call, &self.context) {
            Ok(value) => Ok(Output::Forwarded(value)),
            Err(failure) => Err(Error::Forwarded {
                selector: call.selector.to_string(),
                failure,
            }),
        }
    }
}
