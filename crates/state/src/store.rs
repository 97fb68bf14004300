//! The facade's persistent business-data region
//!
//! `ContextStore` is the storage a forwarded call executes against. It is a
//! versioned in-memory map: every write is assigned a monotonically
//! increasing context version, and every read returns the value wrapped
//! with the version and timestamp that produced it.
//!
//! Every operation validates its key, so the reserved control prefix
//! (`_swivel/`) is rejected at this layer regardless of which
//! implementation is calling. That check is the enforced half of the
//! slot-layout guarantee.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use swivel_core::slots::validate_context_key_with_limits;
use swivel_core::{ContextResult, Limits, StateContext, Value, Version, Versioned};

/// Versioned in-memory store backing the facade's persistent context
///
/// Thread safety: reads take a shared lock, writes an exclusive lock;
/// the version counter is monotonic across all writers.
///
/// # Example
///
/// ```
/// use swivel_state::ContextStore;
/// use swivel_core::{StateContext, Value};
///
/// let store = ContextStore::new();
/// store.put("odometer", Value::Int(42)).unwrap();
/// assert_eq!(store.get("odometer").unwrap().unwrap().value, Value::Int(42));
///
/// // The reserved control region is unreachable from here
/// assert!(store.put("_swivel/admin", Value::Null).is_err());
/// ```
pub struct ContextStore {
    data: RwLock<BTreeMap<String, Versioned<Value>>>,
    version: AtomicU64,
    limits: Limits,
}

impl ContextStore {
    /// Create an empty store with default limits
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an empty store with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        ContextStore {
            data: RwLock::new(BTreeMap::new()),
            version: AtomicU64::new(0),
            limits,
        }
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateContext for ContextStore {
    fn get(&self, key: &str) -> ContextResult<Option<Versioned<Value>>> {
        validate_context_key_with_limits(key, &self.limits)?;
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> ContextResult<Version> {
        validate_context_key_with_limits(key, &self.limits)?;
        let mut data = self.data.write();
        // Allocate under the write lock so versions land in map order.
        let v = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let version = Version::context(v);
        data.insert(key.to_string(), Versioned::new(value, version));
        Ok(version)
    }

    fn delete(&self, key: &str) -> ContextResult<Option<Versioned<Value>>> {
        validate_context_key_with_limits(key, &self.limits)?;
        Ok(self.data.write().remove(key))
    }

    fn scan_prefix(&self, prefix: &str) -> ContextResult<Vec<(String, Versioned<Value>)>> {
        validate_context_key_with_limits(prefix, &self.limits)?;
        Ok(self
            .data
            .read()
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
