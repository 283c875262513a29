use super::catalog::{Arguments, ParameterInfo, TypeDescriptor, TypeLocator};
use super::container::Container;
use super::instance::{Instance, Parameters};
use super::registry::Concrete;
use crate::error::{Result, SingletonizeError};
use dashmap::DashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};

/// Constructs objects from a concrete target, resolving constructor
/// dependencies back through the container.
///
/// Types are looked up in each locator in turn; the first hit wins.
pub struct ObjectBuilder {
    locators: Vec<Arc<dyn TypeLocator>>,
    building: DashMap<ThreadId, Vec<String>>,
}

impl ObjectBuilder {
    pub fn new(locators: Vec<Arc<dyn TypeLocator>>) -> Self {
        Self {
            locators,
            building: DashMap::new(),
        }
    }

    pub fn locate(&self, name: &str) -> Option<TypeDescriptor> {
        self.locators
            .iter()
            .find_map(|locator| locator.locate(name))
    }

    pub fn build(
        &self,
        container: &Container,
        concrete: &Concrete,
        parameters: &Parameters,
    ) -> Result<Instance> {
        match concrete {
            Concrete::Factory(factory) => factory(container, parameters),
            Concrete::Name(target) => self.build_type(container, target, parameters),
        }
    }

    fn build_type(
        &self,
        container: &Container,
        target: &str,
        parameters: &Parameters,
    ) -> Result<Instance> {
        let descriptor = self
            .locate(target)
            .ok_or_else(|| SingletonizeError::unresolvable_target(target))?;

        if !descriptor.is_instantiable() {
            return Err(SingletonizeError::not_instantiable(target));
        }

        if descriptor.parameters().is_empty() {
            return descriptor.construct(Arguments::empty(target));
        }

        let _path = BuildPath::enter(&self.building, target)?;

        let mut values = Vec::with_capacity(descriptor.parameters().len());
        for parameter in descriptor.parameters() {
            let value = self.resolve_parameter(container, target, parameter, parameters)?;
            values.push((parameter.name().to_owned(), value));
        }

        tracing::trace!(target = %target, arguments = values.len(), "Constructing");
        descriptor.construct(Arguments::new(target, values))
    }

    fn resolve_parameter(
        &self,
        container: &Container,
        target: &str,
        parameter: &ParameterInfo,
        parameters: &Parameters,
    ) -> Result<Instance> {
        if let Some(value) = parameters.get(parameter.name()) {
            return Ok(Arc::clone(value));
        }

        if let Some(dependency) = parameter.dependency_name() {
            return container.resolve(dependency);
        }

        parameter
            .default_value()
            .ok_or_else(|| SingletonizeError::unresolvable_dependency(target, parameter.name()))
    }
}

/// The chain of types under construction on the current thread.
struct BuildPath<'a> {
    building: &'a DashMap<ThreadId, Vec<String>>,
    thread: ThreadId,
}

impl<'a> BuildPath<'a> {
    fn enter(building: &'a DashMap<ThreadId, Vec<String>>, target: &str) -> Result<Self> {
        let thread = thread::current().id();
        let mut path = building.entry(thread).or_default();

        if path.iter().any(|entered| entered == target) {
            let mut cycle = path.join(" -> ");
            cycle.push_str(" -> ");
            cycle.push_str(target);
            return Err(SingletonizeError::CircularDependency { cycle });
        }

        path.push(target.to_owned());
        Ok(Self { building, thread })
    }
}

impl Drop for BuildPath<'_> {
    fn drop(&mut self) {
        let empty = match self.building.get_mut(&self.thread) {
            Some(mut path) => {
                path.pop();
                path.is_empty()
            }
            None => false,
        };
        if empty {
            self.building.remove_if(&self.thread, |_, path| path.is_empty());
        }
    }
}
