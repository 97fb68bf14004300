//! Configuration for facade construction
//!
//! This module provides the [`ClashPolicy`] and [`FacadeOptions`] types used
//! to control how a facade is constructed and how it resolves selector
//! clashes between the administrative and forwarded surfaces.

use serde::{Deserialize, Serialize};
use swivel_core::Limits;

/// How a non-admin call to an administrative selector is resolved.
///
/// The administrative and forwarded surfaces share one selector namespace.
/// A call to an administrative selector from the current admin always
/// dispatches to the admin component; this policy decides what happens for
/// every other caller. The policy is fixed at construction so reachability
/// of both surfaces is unambiguous for the facade's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClashPolicy {
    /// Forward the call to the active implementation like any business
    /// call (default). Only the admin ever sees the admin surface; an
    /// implementation may therefore serve its own operation under a
    /// colliding selector for everyone else.
    #[default]
    Forward,
    /// Reject the call with an authorization error. The administrative
    /// selectors are unreachable as business operations for all callers.
    Reject,
}

/// Options for constructing a facade.
///
/// Use the builder pattern to configure options.
///
/// ```
/// use swivel_facade::{ClashPolicy, FacadeOptions};
/// use swivel_core::Limits;
///
/// let opts = FacadeOptions::new()
///     .clash_policy(ClashPolicy::Reject)
///     .limits(Limits::with_small_limits());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FacadeOptions {
    /// Resolution for non-admin calls to administrative selectors.
    pub clash_policy: ClashPolicy,
    /// Size limits enforced on inbound payloads and context keys.
    pub limits: Limits,
}

impl FacadeOptions {
    /// Create options with default settings (`Forward` policy, default limits).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clash policy.
    pub fn clash_policy(mut self, policy: ClashPolicy) -> Self {
        self.clash_policy = policy;
        self
    }

    /// Set the size limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
