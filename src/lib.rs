//! Swivel - upgradable call-delegation facade
//!
//! Swivel is a stable entry point that forwards inbound calls to a
//! currently-configured backing implementation, while an admin identity
//! exclusively controls which implementation is active and who holds
//! adminship.
//!
//! # Quick Start
//!
//! ```ignore
//! use swivel::{Call, Facade, FacadeOptions, Identity, Registry, Value};
//! use std::sync::Arc;
//!
//! let mut registry = Registry::new();
//! registry.register(Arc::new(CarV1))?;
//!
//! let facade = Facade::new(
//!     Arc::new(registry),
//!     "car-v1".parse()?,
//!     Identity::new("alice")?,
//!     FacadeOptions::new(),
//! )?;
//!
//! // Business calls forward to the active implementation
//! let out = facade.invoke(Call::new("car/drive".parse()?, Value::Null, alice))?;
//! ```
//!
//! # Architecture
//!
//! All calls go through [`Facade::invoke`]. Administrative selectors are a
//! closed set dispatched to the [`Admin`] component under a caller-identity
//! check; every other selector is forwarded to the active implementation,
//! which executes against the facade's own persistent context.
//!
//! Internal implementation details (context store, control state) are not
//! exposed - only the facade API is public.

// Re-export the public API from swivel-facade
pub use swivel_facade::*;
