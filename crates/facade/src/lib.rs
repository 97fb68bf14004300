//! # Swivel Facade
//!
//! The public API for swivel - an upgradable call-delegation facade.
//!
//! This is the only crate users need to import. It provides:
//! - [`Facade`] - the stable entry point that dispatches every inbound call
//! - [`Admin`] - the administrative component controlling repointing
//! - [`Registry`] - the set of known backing implementations
//! - [`Call`]/[`Output`]/[`Error`] - the wire-friendly invocation boundary
//!
//! ## Quick Start
//!
//! ```text
//! use swivel_facade::{Call, Facade, FacadeOptions, Identity, Registry, Value};
//! use std::sync::Arc;
//!
//! let mut registry = Registry::new();
//! let v1 = registry.register(Arc::new(CarV1))?;
//!
//! let facade = Facade::new(
//!     Arc::new(registry),
//!     v1,
//!     Identity::new("alice")?,
//!     FacadeOptions::new(),
//! )?;
//!
//! let out = facade.invoke(Call::new("car/drive".parse()?, Value::Null, alice))?;
//! ```
//!
//! ## Dispatch
//!
//! Every call goes through [`Facade::invoke`]. The four administrative
//! selectors (`admin/get_implementation`, `admin/get_admin`,
//! `admin/change_admin`, `admin/upgrade_implementation`) form a closed set
//! checked first: calls from the current admin are handled by the [`Admin`]
//! component, and calls from anyone else follow the configured
//! [`ClashPolicy`]. Everything else is forwarded unmodified to the active
//! implementation, which executes against the facade's persistent context,
//! so business data survives implementation swaps.

#![warn(missing_docs)]

mod admin;
mod call;
mod error;
mod facade;
mod options;
mod output;
mod registry;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use admin::Admin;
pub use call::AdminCall;
pub use error::{ConfigError, Error};
pub use facade::Facade;
pub use options::{ClashPolicy, FacadeOptions};
pub use output::Output;
pub use registry::{Registry, RegistryError};

// Re-export core types so users don't need swivel-core directly
pub use swivel_core::{
    Call, CallFailure, CallId, Descriptor, Identity, Implementation, ImplementationId, Limits,
    Selector, StateContext, Value, Version, Versioned,
};

// Re-export the context store and control pair for embedders and tests
pub use swivel_state::{ContextStore, ControlPair};

/// Result type for facade operations
pub type Result<T> = std::result::Result<T, Error>;
