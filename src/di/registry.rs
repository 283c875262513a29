use super::container::Container;
use super::instance::{Instance, Parameters};
use crate::error::Result;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Builds an object on demand. Receives the container so it can resolve its
/// own dependencies, and the parameters the caller supplied.
pub type Factory = Arc<dyn Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync>;

/// How a binding produces its object.
#[derive(Clone)]
pub enum Concrete {
    /// Build the named type. When the name equals the bound abstract name the
    /// type is constructed directly, otherwise resolution is redirected.
    Name(String),
    Factory(Factory),
}

impl Concrete {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
    {
        Concrete::Factory(Arc::new(factory))
    }

    /// Whether the builder handles this concrete directly for `name` rather
    /// than chasing it as another abstract name.
    pub fn is_buildable_for(&self, name: &str) -> bool {
        match self {
            Concrete::Name(concrete) => concrete == name,
            Concrete::Factory(_) => true,
        }
    }
}

impl fmt::Debug for Concrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concrete::Name(name) => write!(f, "Name({})", name),
            Concrete::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

impl From<&str> for Concrete {
    fn from(name: &str) -> Self {
        Concrete::Name(name.to_owned())
    }
}

impl From<String> for Concrete {
    fn from(name: String) -> Self {
        Concrete::Name(name)
    }
}

#[derive(Clone, Debug)]
pub struct BindingRecord {
    pub concrete: Concrete,
    pub shared: bool,
}

impl BindingRecord {
    /// The record used for names nobody bound: build the name itself, transient.
    pub fn direct(name: &str) -> Self {
        Self {
            concrete: Concrete::Name(name.to_owned()),
            shared: false,
        }
    }
}

/// Abstract name -> binding record.
#[derive(Default)]
pub struct BindingRegistry {
    bindings: DashMap<String, BindingRecord>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or silently replaces the binding for `name`.
    pub fn bind(&self, name: impl Into<String>, concrete: Concrete, shared: bool) {
        self.bindings
            .insert(name.into(), BindingRecord { concrete, shared });
    }

    pub fn get(&self, name: &str) -> Option<BindingRecord> {
        self.bindings.get(name).map(|entry| entry.value().clone())
    }

    /// The explicit binding for `name`, or the synthesized direct record.
    pub fn record_for(&self, name: &str) -> BindingRecord {
        self.get(name).unwrap_or_else(|| BindingRecord::direct(name))
    }

    /// Mutates the binding for `name` in place, synthesizing the direct
    /// record first when there is none.
    pub fn rewrite<F>(&self, name: &str, rewrite: F)
    where
        F: FnOnce(&mut BindingRecord),
    {
        let mut entry = self
            .bindings
            .entry(name.to_owned())
            .or_insert_with(|| BindingRecord::direct(name));
        rewrite(entry.value_mut());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn is_shared(&self, name: &str) -> bool {
        self.bindings
            .get(name)
            .map(|entry| entry.shared)
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binding_is_direct_and_transient() {
        let registry = BindingRegistry::new();
        let record = registry.record_for("SampleService");
        assert!(record.concrete.is_buildable_for("SampleService"));
        assert!(!record.shared);
        assert!(!registry.contains("SampleService"));
    }

    #[test]
    fn test_bind_replaces_existing() {
        let registry = BindingRegistry::new();
        registry.bind("Cache", Concrete::from("RedisCache"), false);
        registry.bind("Cache", Concrete::from("MemoryCache"), true);

        let record = registry.get("Cache").unwrap();
        assert!(record.shared);
        assert!(matches!(record.concrete, Concrete::Name(ref n) if n == "MemoryCache"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rewrite_synthesizes_missing_record() {
        let registry = BindingRegistry::new();
        registry.rewrite("SampleService", |record| record.shared = true);
        assert!(registry.is_shared("SampleService"));
        assert!(registry
            .record_for("SampleService")
            .concrete
            .is_buildable_for("SampleService"));
    }
}
