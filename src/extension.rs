use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{Finder, FinderError};

/// Named operation callable on a [`Finder`] through [`Finder::call`].
///
/// Receives the query and the caller's arguments and returns the query to
/// continue the chain with.
pub type ExtensionMethod =
    Arc<dyn Fn(Finder, &[&str]) -> Result<Finder, FinderError> + Send + Sync>;

/// Shared table of extension methods.
///
/// Clones share one table: a method registered through any clone is visible
/// to every finder holding the registry, including finders created before
/// the registration. Registering an existing name replaces the method.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    methods: Arc<RwLock<HashMap<String, ExtensionMethod>>>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `method` under `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use finder::{ExtensionRegistry, Finder};
    ///
    /// let registry = ExtensionRegistry::new();
    /// registry.register("shallow", |finder, _args| finder.limit_depth(0));
    /// assert!(registry.contains("shallow"));
    /// ```
    pub fn register<F>(&self, name: impl Into<String>, method: F)
    where
        F: Fn(Finder, &[&str]) -> Result<Finder, FinderError> + Send + Sync + 'static,
    {
        let mut methods = self.methods.write().unwrap_or_else(PoisonError::into_inner);
        methods.insert(name.into(), Arc::new(method));
    }

    /// Returns the method registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ExtensionMethod> {
        let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
        methods.get(name).cloned()
    }

    /// Reports whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
        methods.contains_key(name)
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = methods.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("methods", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = ExtensionRegistry::new();
        assert!(!registry.contains("anything"));
        assert!(registry.get("anything").is_none());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn clones_share_registrations() {
        let registry = ExtensionRegistry::new();
        let clone = registry.clone();
        clone.register("b", |finder, _| Ok(finder));
        registry.register("a", |finder, _| Ok(finder));

        assert_eq!(registry.names(), ["a", "b"]);
        assert!(clone.contains("a"));
    }

    #[test]
    fn later_registration_wins() {
        let registry = ExtensionRegistry::new();
        registry.register("depth", |finder, _| finder.limit_depth(1));
        registry.register("depth", |_, _| Err(FinderError::NoPaths));

        let method = registry.get("depth").expect("registered");
        let result = method(Finder::find_files(["*"]).expect("finder"), &[]);
        assert!(matches!(result, Err(FinderError::NoPaths)));
        assert_eq!(registry.names().len(), 1);
    }

    #[test]
    fn debug_lists_names() {
        let registry = ExtensionRegistry::new();
        registry.register("newest", |finder, _| Ok(finder));
        assert_eq!(
            format!("{registry:?}"),
            "ExtensionRegistry { methods: [\"newest\"] }"
        );
    }
}
