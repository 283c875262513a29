use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A type-erased object produced by the container.
///
/// Trait objects are stored one level deeper, as `Arc<Arc<dyn Trait>>`, so
/// they can be downcast back into `Arc<dyn Trait>`.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wraps a concrete value into an [`Instance`].
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

/// Wraps a trait object into an [`Instance`].
pub fn trait_instance<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Instance {
    Arc::new(value)
}

/// What a caller asks the container for.
///
/// Only `Name` takes part in bindings, caching and interception. `Other`
/// carries an opaque value straight through the pipeline.
#[derive(Clone)]
pub enum AbstractRef {
    Name(String),
    Other(Instance),
}

impl AbstractRef {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            AbstractRef::Name(name) => Some(name),
            AbstractRef::Other(_) => None,
        }
    }
}

impl fmt::Debug for AbstractRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractRef::Name(name) => write!(f, "Name({})", name),
            AbstractRef::Other(_) => write!(f, "Other(..)"),
        }
    }
}

impl From<&str> for AbstractRef {
    fn from(name: &str) -> Self {
        AbstractRef::Name(name.to_owned())
    }
}

impl From<String> for AbstractRef {
    fn from(name: String) -> Self {
        AbstractRef::Name(name)
    }
}

impl From<&String> for AbstractRef {
    fn from(name: &String) -> Self {
        AbstractRef::Name(name.clone())
    }
}

impl From<Instance> for AbstractRef {
    fn from(value: Instance) -> Self {
        AbstractRef::Other(value)
    }
}

/// Caller-supplied constructor arguments, keyed by parameter name.
#[derive(Clone, Default)]
pub struct Parameters {
    values: HashMap<String, Instance>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply a plain value for the named parameter.
    pub fn with<T: Any + Send + Sync>(self, name: impl Into<String>, value: T) -> Self {
        self.with_instance(name, Arc::new(value))
    }

    /// Supply an already shared object, e.g. a dependency built elsewhere.
    pub fn with_instance(mut self, name: impl Into<String>, value: Instance) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("Parameters").field("names", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_builder() {
        let params = Parameters::new().with("value", String::from("first"));
        assert!(!params.is_empty());
        assert!(params.contains("value"));
        let value = params.get("value").unwrap().downcast_ref::<String>().unwrap();
        assert_eq!(value, "first");
    }

    #[test]
    fn test_abstract_ref_name() {
        let name: AbstractRef = "SampleService".into();
        assert_eq!(name.as_name(), Some("SampleService"));

        let other: AbstractRef = instance(5_u8).into();
        assert!(other.as_name().is_none());
    }
}
