use super::catalog::{Constructable, TypeDescriptor, TypeLocator};
use super::container::Container;
use super::instance::{Instance, Parameters};
use super::registry::Concrete;
use crate::error::Result;
use std::sync::Arc;

/// Builder for constructing a container
///
/// Use this to register types, bindings and instances up front before
/// handing the container out.
///
/// # Example
/// ```
/// use singletonize::{ContainerBuilder, instance};
///
/// let container = ContainerBuilder::new()
///     .instance("app.name", instance(String::from("demo")))
///     .factory("clock", |_, _| Ok(instance(0_u64)))
///     .build();
///
/// assert!(container.is_bound("clock"));
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    locator: Option<Arc<dyn TypeLocator>>,
    descriptors: Vec<TypeDescriptor>,
    steps: Vec<Box<dyn FnOnce(&Container)>>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `locator` before the container's own catalog.
    pub fn locator(mut self, locator: Arc<dyn TypeLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn register_type<T: Constructable>(mut self) -> Self {
        self.descriptors.push(T::descriptor());
        self
    }

    pub fn descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn bind(mut self, name: impl Into<String>, concrete: Option<Concrete>, shared: bool) -> Self {
        let name = name.into();
        self.steps
            .push(Box::new(move |container| container.bind(name, concrete, shared)));
        self
    }

    pub fn singleton(self, name: impl Into<String>, concrete: Option<Concrete>) -> Self {
        self.bind(name, concrete, true)
    }

    pub fn factory<F>(self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
    {
        self.bind(name, Some(Concrete::factory(factory)), false)
    }

    pub fn instance(mut self, name: impl Into<String>, instance: Instance) -> Self {
        let name = name.into();
        self.steps.push(Box::new(move |container| {
            container.register_instance(name, instance);
        }));
        self
    }

    pub fn alias(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        let name = name.into();
        let alias = alias.into();
        self.steps
            .push(Box::new(move |container| container.alias(name, alias)));
        self
    }

    /// Build the container
    pub fn build(self) -> Container {
        let container = match self.locator {
            Some(locator) => Container::with_locator(locator),
            None => Container::new(),
        };
        for descriptor in self.descriptors {
            container.catalog().insert(descriptor);
        }
        for step in self.steps {
            step(&container);
        }
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::instance::instance;

    struct Clock;

    struct FixedLocator;

    impl TypeLocator for FixedLocator {
        fn locate(&self, name: &str) -> Option<TypeDescriptor> {
            (name == "clock").then(|| TypeDescriptor::named("clock", vec![], |_| Ok(instance(Clock))))
        }
    }

    #[test]
    fn test_builder_applies_steps() {
        let container = ContainerBuilder::new()
            .singleton("greeting", Some(Concrete::factory(|_, _| Ok(instance(String::from("hi"))))))
            .instance("answer", instance(42_u32))
            .alias("greeting", "hello")
            .build();

        let first = container.resolve("hello").unwrap();
        let second = container.resolve("greeting").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*container.resolve("answer").unwrap().downcast_ref::<u32>().unwrap(), 42);
    }

    #[test]
    fn test_custom_locator_is_consulted() {
        let container = ContainerBuilder::new()
            .locator(Arc::new(FixedLocator))
            .build();

        let clock = container.resolve("clock").unwrap();
        assert!(clock.is::<Clock>());
    }
}
