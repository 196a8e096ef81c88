//! Validator registry: the name -> predicate map an engine resolves rules against.
//!
//! This module provides the [`ValidatorRegistry`] type that stores named
//! validators and lets applications add or remove custom entries.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::rule::Validator;
use crate::validators;

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<IndexMap<String, Validator>>>;

/// A thread-safe mapping from validator name to predicate.
///
/// Cloning a registry yields another handle to the same map. Use [`fork`]
/// for an independent copy.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Engines resolve validators under a short read lock and release it
///   before awaiting the predicate
/// - Registration operations are serialized (write access)
///
/// Registration is meant to happen during setup. Mutating a registry while
/// runs are in flight is allowed by the lock but gives no guarantee about
/// which version of an entry a concurrent run sees.
///
/// # Example
///
/// ```rust
/// use triage::{Validator, ValidatorRegistry};
///
/// let registry = ValidatorRegistry::new();
/// assert!(registry.contains("isEmail"));
///
/// registry.register("isEven", Validator::from_fn(|value, _, _| {
///     value.as_i64().map_or(false, |n| n % 2 == 0)
/// }));
/// assert!(registry.lookup("isEven").is_some());
///
/// registry.unregister("isEven");
/// assert!(registry.lookup("isEven").is_none());
/// ```
///
/// [`fork`]: ValidatorRegistry::fork
pub struct ValidatorRegistry {
    validators: ValidatorMap,
}

impl ValidatorRegistry {
    /// Creates a registry holding every built-in validator.
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut validators = registry.validators.write();
            for (name, validator) in validators::builtins() {
                validators.insert(name.to_string(), validator);
            }
        }
        registry
    }

    /// Creates a registry with no validators at all.
    pub fn empty() -> Self {
        Self {
            validators: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Registers a validator, replacing and returning any previous entry.
    pub fn register(&self, name: impl Into<String>, validator: Validator) -> Option<Validator> {
        let name = name.into();
        tracing::debug!(validator = %name, "registering validator");
        self.validators.write().insert(name, validator)
    }

    /// Registers a validator unless the name is already taken.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// ```rust
    /// use triage::{Validator, ValidatorRegistry};
    ///
    /// let registry = ValidatorRegistry::new();
    /// let always = Validator::from_fn(|_, _, _| true);
    /// assert!(registry.try_register("isEmail", always).is_err());
    /// ```
    pub fn try_register(
        &self,
        name: impl Into<String>,
        validator: Validator,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        validators.insert(name, validator);
        Ok(())
    }

    /// Removes a validator, returning it if it was registered.
    pub fn unregister(&self, name: &str) -> Option<Validator> {
        self.validators.write().shift_remove(name)
    }

    /// Retrieves a validator by name.
    pub fn lookup(&self, name: &str) -> Option<Validator> {
        self.validators.read().get(name).cloned()
    }

    /// Returns true if a validator is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Returns every registered name in registration order.
    pub fn names(&self) -> Vec<String> {
        self.validators.read().keys().cloned().collect()
    }

    /// Returns the number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    /// Returns true if no validator is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Returns an independent copy of this registry.
    pub fn fork(&self) -> Self {
        Self {
            validators: Arc::new(RwLock::new(self.validators.read().clone())),
        }
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ValidatorRegistry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
        }
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),
}
