//! Run context shared by every predicate and block of one run.
//!
//! This module provides the [`RunContext`] type. A context is a cheap clonable
//! handle: every clone sees the same key/value map, so a predicate can leave
//! a value behind for rules evaluated after it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

/// Shared key/value state threaded through a validation or handling run.
///
/// The context uses `Arc<RwLock<...>>` so that it can be handed to async
/// predicates by reference and still be mutated. Guards are released before
/// each method returns; none is ever held across an await point.
///
/// # Example
///
/// ```rust
/// use triage::RunContext;
/// use serde_json::json;
///
/// let context = RunContext::new();
/// context.insert("tenant", json!("acme"));
///
/// let shared = context.clone();
/// assert_eq!(shared.get("tenant"), Some(json!("acme")));
/// ```
#[derive(Clone, Default)]
pub struct RunContext {
    values: Arc<RwLock<Map<String, Value>>>,
}

impl RunContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context seeded with the given values.
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Returns a clone of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Stores a value, returning the previous one.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.write().insert(key.into(), value)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().remove(key)
    }

    /// Returns a copy of every stored value.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.values.read().clone()
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("values", &*self.values.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clones_share_state() {
        let context = RunContext::new();
        let clone = context.clone();

        clone.insert("seen", json!(true));
        assert_eq!(context.get("seen"), Some(json!(true)));
        assert!(context.contains("seen"));
    }

    #[test]
    fn test_insert_returns_previous() {
        let context = RunContext::new();
        assert_eq!(context.insert("n", json!(1)), None);
        assert_eq!(context.insert("n", json!(2)), Some(json!(1)));
        assert_eq!(context.remove("n"), Some(json!(2)));
        assert!(!context.contains("n"));
    }

    #[test]
    fn test_from_map() {
        let mut map = Map::new();
        map.insert("user".to_string(), json!("ann"));
        let context = RunContext::from_map(map.clone());
        assert_eq!(context.snapshot(), map);
    }
}
