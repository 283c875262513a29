use super::cache::InstanceCache;
use super::catalog::{Constructable, TypeCatalog, TypeLocator, type_key};
use super::hooks::{HookDispatcher, HookTarget};
use super::instance::{AbstractRef, Instance, Parameters, trait_instance};
use super::object_builder::ObjectBuilder;
use super::registry::{BindingRegistry, Concrete};
use crate::error::{Result, SingletonizeError};
use dashmap::{DashMap, DashSet};
use parking_lot::ReentrantMutex;
use std::any::Any;
use std::sync::Arc;
use std::thread::{self, ThreadId};

/// Thread-safe dependency injection container.
///
/// Resolves abstract names to objects through bindings, the instance cache,
/// and constructor introspection, firing before/after hooks around every
/// resolution. Resolutions are serialized per container: a thread holds the
/// resolution lock for its whole outermost `resolve`, nested calls on that
/// thread re-enter it.
pub struct Container {
    bindings: BindingRegistry,
    instances: InstanceCache,
    resolved: DashSet<String>,
    aliases: DashMap<String, String>,
    hooks: HookDispatcher,
    catalog: Arc<TypeCatalog>,
    builder: ObjectBuilder,
    depths: DashMap<ThreadId, usize>,
    resolving: ReentrantMutex<()>,
}

impl Container {
    pub fn new() -> Self {
        let catalog = Arc::new(TypeCatalog::new());
        let locators: Vec<Arc<dyn TypeLocator>> = vec![catalog.clone()];
        Self::from_parts(catalog, locators)
    }

    /// A container that consults `locator` before its own type catalog.
    pub fn with_locator(locator: Arc<dyn TypeLocator>) -> Self {
        let catalog = Arc::new(TypeCatalog::new());
        let locators: Vec<Arc<dyn TypeLocator>> = vec![locator, catalog.clone()];
        Self::from_parts(catalog, locators)
    }

    fn from_parts(catalog: Arc<TypeCatalog>, locators: Vec<Arc<dyn TypeLocator>>) -> Self {
        Self {
            bindings: BindingRegistry::new(),
            instances: InstanceCache::new(),
            resolved: DashSet::new(),
            aliases: DashMap::new(),
            hooks: HookDispatcher::new(),
            catalog,
            builder: ObjectBuilder::new(locators),
            depths: DashMap::new(),
            resolving: ReentrantMutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn hooks(&self) -> &HookDispatcher {
        &self.hooks
    }

    /// Makes `T` constructable by name through the container's catalog.
    pub fn register_type<T: Constructable>(&self) -> &Self {
        self.catalog.register::<T>();
        self
    }

    // --- Bindings ---

    /// Registers a binding. Without a concrete the name builds itself.
    pub fn bind(&self, name: impl Into<String>, concrete: Option<Concrete>, shared: bool) {
        let name = name.into();
        let concrete = concrete.unwrap_or_else(|| Concrete::Name(name.clone()));
        tracing::debug!(abstract = %name, concrete = ?concrete, shared, "Binding");
        self.bindings.bind(name, concrete, shared);
    }

    pub fn singleton(&self, name: impl Into<String>, concrete: Option<Concrete>) {
        self.bind(name, concrete, true);
    }

    pub fn bind_factory<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
    {
        self.bind(name, Some(Concrete::factory(factory)), false);
    }

    pub fn singleton_factory<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
    {
        self.bind(name, Some(Concrete::factory(factory)), true);
    }

    /// Binds a trait object, resolvable later with [`Container::make_trait`].
    pub fn bind_trait<T, F>(&self, factory: F)
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container, &Parameters) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.bind_factory(type_key::<T>(), move |container, parameters| {
            factory(container, parameters).map(trait_instance)
        });
    }

    /// Resolves `alias` as if it were `name`.
    pub fn alias(&self, name: impl Into<String>, alias: impl Into<String>) {
        let name = name.into();
        let alias = alias.into();
        if name == alias {
            tracing::warn!(abstract = %name, "Ignoring alias of a name to itself");
            return;
        }
        self.aliases.insert(alias, name);
    }

    /// Follows the alias chain for `name`; identity when no alias exists.
    pub fn get_alias(&self, name: &str) -> String {
        let mut current = name.to_owned();
        // Bounded so a cyclic chain cannot spin forever.
        for _ in 0..=self.aliases.len() {
            match self.aliases.get(&current) {
                Some(target) => current = target.value().clone(),
                None => break,
            }
        }
        current
    }

    // --- Instances ---

    /// Stores `instance` directly in the cache and returns it unchanged.
    pub fn register_instance(&self, name: impl Into<String>, instance: Instance) -> Instance {
        let name = name.into();
        self.instances.set(name.clone(), Arc::clone(&instance));
        self.resolved.insert(name);
        instance
    }

    /// Registers a concrete value under its type name.
    pub fn instance<T: Any + Send + Sync>(&self, value: T) -> Arc<T> {
        let shared = Arc::new(value);
        self.register_instance(type_key::<T>(), shared.clone());
        shared
    }

    pub fn forget_instance(&self, name: &str) {
        let name = self.get_alias(name);
        self.instances.forget(&name);
        self.resolved.remove(&name);
        tracing::debug!(abstract = %name, "Forgot instance");
        self.hooks.fire_forget(Some(&name), self);
    }

    pub fn forget_instances(&self) {
        self.instances.forget_all();
        tracing::debug!("Forgot all instances");
        self.hooks.fire_forget(None, self);
    }

    /// Returns the container to its initial empty state. Registered types
    /// stay in the catalog.
    pub fn reset(&self) {
        self.hooks.fire_forget(None, self);
        self.bindings.clear();
        self.instances.forget_all();
        self.resolved.clear();
        self.aliases.clear();
        self.hooks.clear();
        tracing::debug!("Container reset");
    }

    // --- Queries ---

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains(name) || self.instances.has(name) || self.aliases.contains_key(name)
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        let name = self.get_alias(name);
        self.resolved.contains(&name) || self.instances.has(&name)
    }

    pub fn has_instance(&self, name: &str) -> bool {
        self.instances.has(name)
    }

    /// The cached object for `name`, without running a resolution.
    pub fn cached_instance(&self, name: &str) -> Option<Instance> {
        self.instances.get(name)
    }

    /// How many resolutions are in flight on the current thread.
    pub fn resolution_depth(&self) -> usize {
        self.depths
            .get(&thread::current().id())
            .map(|depth| *depth)
            .unwrap_or(0)
    }

    // --- Hooks ---

    pub fn before_resolving<F>(&self, target: impl Into<HookTarget>, hook: F) -> &Self
    where
        F: Fn(&AbstractRef, &Parameters, &Container) -> Result<()> + Send + Sync + 'static,
    {
        self.hooks.add_before(target.into(), Arc::new(hook));
        self
    }

    pub fn before_resolving_any<F>(&self, hook: F) -> &Self
    where
        F: Fn(&AbstractRef, &Parameters, &Container) -> Result<()> + Send + Sync + 'static,
    {
        self.hooks.add_before(HookTarget::Any, Arc::new(hook));
        self
    }

    pub fn after_resolving<F>(&self, target: impl Into<HookTarget>, hook: F) -> &Self
    where
        F: Fn(&Instance, &Container) -> Result<()> + Send + Sync + 'static,
    {
        self.hooks.add_after(target.into(), Arc::new(hook));
        self
    }

    pub fn after_resolving_any<F>(&self, hook: F) -> &Self
    where
        F: Fn(&Instance, &Container) -> Result<()> + Send + Sync + 'static,
    {
        self.hooks.add_after(HookTarget::Any, Arc::new(hook));
        self
    }

    pub fn abandoned_resolving_any<F>(&self, hook: F) -> &Self
    where
        F: Fn(&AbstractRef, &Container) + Send + Sync + 'static,
    {
        self.hooks.add_abandon(HookTarget::Any, Arc::new(hook));
        self
    }

    pub fn on_forget<F>(&self, hook: F) -> &Self
    where
        F: Fn(Option<&str>, &Container) + Send + Sync + 'static,
    {
        self.hooks.add_forget(Arc::new(hook));
        self
    }

    // --- Resolution ---

    pub fn resolve(&self, abstract_ref: impl Into<AbstractRef>) -> Result<Instance> {
        self.resolve_with(abstract_ref, &Parameters::new())
    }

    pub fn resolve_with(
        &self,
        abstract_ref: impl Into<AbstractRef>,
        parameters: &Parameters,
    ) -> Result<Instance> {
        let _serialized = self.resolving.lock();

        let abstract_ref = match abstract_ref.into() {
            AbstractRef::Name(name) => AbstractRef::Name(self.get_alias(&name)),
            other => other,
        };

        let mut scope = ResolutionScope::enter(self, &abstract_ref);
        tracing::trace!(abstract = ?abstract_ref, depth = scope.depth, "Resolving");

        self.hooks.fire_before(&abstract_ref, parameters, self)?;

        let instance = match &abstract_ref {
            AbstractRef::Name(name) => self.resolve_name(name, parameters)?,
            AbstractRef::Other(value) => Arc::clone(value),
        };

        self.hooks.fire_after(&abstract_ref, &instance, self)?;
        scope.complete();

        Ok(instance)
    }

    fn resolve_name(&self, name: &str, parameters: &Parameters) -> Result<Instance> {
        if parameters.is_empty() {
            if let Some(instance) = self.instances.get(name) {
                tracing::trace!(abstract = %name, "Instance cache hit");
                return Ok(instance);
            }
        }

        let record = self.bindings.record_for(name);
        let instance = match &record.concrete {
            Concrete::Name(concrete) if !record.concrete.is_buildable_for(name) => {
                self.resolve_with(concrete.as_str(), parameters)?
            }
            concrete => self.builder.build(self, concrete, parameters)?,
        };

        self.resolved.insert(name.to_owned());

        // Parameterized builds are always fresh and never cached.
        if parameters.is_empty() && self.bindings.is_shared(name) {
            self.instances.set(name, Arc::clone(&instance));
        }

        Ok(instance)
    }

    /// Runs the builder on `concrete` without touching hooks or the cache.
    pub fn build(&self, concrete: &Concrete, parameters: &Parameters) -> Result<Instance> {
        self.builder.build(self, concrete, parameters)
    }

    // --- Typed helpers ---

    pub fn make<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.make_with::<T>(&Parameters::new())
    }

    pub fn make_with<T: Any + Send + Sync>(&self, parameters: &Parameters) -> Result<Arc<T>> {
        self.resolve_with(type_key::<T>(), parameters)?
            .downcast::<T>()
            .map_err(|_| SingletonizeError::DowncastFailed {
                type_name: type_key::<T>().to_string(),
            })
    }

    pub fn make_trait<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let instance = self.resolve(type_key::<T>())?;
        instance
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| SingletonizeError::DowncastFailed {
                type_name: type_key::<T>().to_string(),
            })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks one in-flight resolution on the current thread.
///
/// Dropping a scope that never completed fires the abandon hooks, so every
/// before-hook firing is matched by either after-hooks or abandon hooks.
struct ResolutionScope<'a> {
    container: &'a Container,
    abstract_ref: &'a AbstractRef,
    thread: ThreadId,
    depth: usize,
    completed: bool,
}

impl<'a> ResolutionScope<'a> {
    fn enter(container: &'a Container, abstract_ref: &'a AbstractRef) -> Self {
        let thread = thread::current().id();
        let depth = {
            let mut depth = container.depths.entry(thread).or_insert(0);
            *depth += 1;
            *depth
        };
        Self {
            container,
            abstract_ref,
            thread,
            depth,
            completed: false,
        }
    }

    fn complete(&mut self) {
        self.completed = true;
    }
}

impl Drop for ResolutionScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            tracing::debug!(abstract = ?self.abstract_ref, depth = self.depth, "Resolution abandoned");
            self.container
                .hooks
                .fire_abandon(self.abstract_ref, self.container);
        }

        let outermost = match self.container.depths.get_mut(&self.thread) {
            Some(mut depth) => {
                *depth -= 1;
                *depth == 0
            }
            None => false,
        };
        if outermost {
            self.container
                .depths
                .remove_if(&self.thread, |_, depth| *depth == 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::catalog::{ParameterInfo, TypeDescriptor};
    use std::sync::Mutex;

    struct SampleService;

    struct DependentService {
        sample: Arc<SampleService>,
    }

    struct ParameterizedService {
        value: String,
    }

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct EnglishGreeter;

    impl Greeter for EnglishGreeter {
        fn greet(&self) -> String {
            "Hello".to_string()
        }
    }

    fn container() -> Container {
        let container = Container::new();
        container
            .catalog()
            .insert(TypeDescriptor::of::<SampleService, _>(vec![], |_| {
                Ok(SampleService)
            }))
            .insert(TypeDescriptor::of::<DependentService, _>(
                vec![ParameterInfo::dependency::<SampleService>("sample")],
                |mut args| {
                    Ok(DependentService {
                        sample: args.next_shared()?,
                    })
                },
            ))
            .insert(TypeDescriptor::of::<ParameterizedService, _>(
                vec![ParameterInfo::value::<String>("value")],
                |mut args| {
                    Ok(ParameterizedService {
                        value: args.next_value()?,
                    })
                },
            ))
            .register_abstract::<dyn Greeter>();
        container
    }

    #[test]
    fn test_unbound_types_are_transient() {
        let container = container();
        let first = container.make::<SampleService>().unwrap();
        let second = container.make::<SampleService>().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(container.is_resolved(type_key::<SampleService>()));
        assert!(!container.is_bound(type_key::<SampleService>()));
    }

    #[test]
    fn test_singleton_binding_is_cached() {
        let container = container();
        container.singleton(type_key::<SampleService>(), None);

        let first = container.make::<SampleService>().unwrap();
        let second = container.make::<SampleService>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(container.has_instance(type_key::<SampleService>()));
    }

    #[test]
    fn test_dependencies_are_resolved_through_container() {
        let container = container();
        let sample = container.instance(SampleService);

        let dependent = container.make::<DependentService>().unwrap();
        assert!(Arc::ptr_eq(&dependent.sample, &sample));
    }

    #[test]
    fn test_parameters_supply_constructor_values() {
        let container = container();
        let params = Parameters::new().with("value", String::from("first"));
        let service = container
            .make_with::<ParameterizedService>(&params)
            .unwrap();
        assert_eq!(service.value, "first");
    }

    #[test]
    fn test_missing_value_is_unresolvable_dependency() {
        let container = container();
        let err = container.make::<ParameterizedService>().err().unwrap();
        assert!(matches!(
            err,
            SingletonizeError::UnresolvableDependency { ref parameter, .. } if parameter == "value"
        ));
    }

    #[test]
    fn test_default_value_is_used() {
        let container = Container::new();
        container.catalog().insert(TypeDescriptor::of::<ParameterizedService, _>(
            vec![ParameterInfo::value::<String>("value").with_default(|| String::from("fallback"))],
            |mut args| {
                Ok(ParameterizedService {
                    value: args.next_value()?,
                })
            },
        ));

        let service = container.make::<ParameterizedService>().unwrap();
        assert_eq!(service.value, "fallback");
    }

    #[test]
    fn test_unknown_and_abstract_targets() {
        let container = container();
        assert!(matches!(
            container.resolve("Missing").err().unwrap(),
            SingletonizeError::UnresolvableTarget { ref target } if target == "Missing"
        ));
        assert!(matches!(
            container.make_trait::<dyn Greeter>().err().unwrap(),
            SingletonizeError::NotInstantiable { .. }
        ));
    }

    #[test]
    fn test_bind_trait_factory() {
        let container = container();
        container.bind_trait::<dyn Greeter, _>(|_, _| Ok(Arc::new(EnglishGreeter) as Arc<dyn Greeter>));
        let greeter = container.make_trait::<dyn Greeter>().unwrap();
        assert_eq!(greeter.greet(), "Hello");
    }

    #[test]
    fn test_shared_binding_does_not_cache_parameterized_builds() {
        let container = container();
        container.singleton(type_key::<ParameterizedService>(), None);

        let params = Parameters::new().with("value", String::from("first"));
        let first = container.make_with::<ParameterizedService>(&params).unwrap();
        let second = container.make_with::<ParameterizedService>(&params).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(!container.has_instance(type_key::<ParameterizedService>()));
    }

    #[test]
    fn test_redirect_and_alias() {
        let container = container();
        container.singleton("sample", Some(Concrete::from(type_key::<SampleService>())));
        container.alias("sample", "sample.alias");

        let first = container.resolve("sample").unwrap();
        let second = container.resolve("sample.alias").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.downcast_ref::<SampleService>().is_some());
        assert!(container.is_bound("sample.alias"));
        assert!(container.is_resolved("sample.alias"));
    }

    #[test]
    fn test_register_instance_short_circuits_build() {
        let container = Container::new();
        let value: Instance = Arc::new(String::from("configured"));
        let returned = container.register_instance("config", value.clone());
        assert!(Arc::ptr_eq(&returned, &value));

        let resolved = container.resolve("config").unwrap();
        assert!(Arc::ptr_eq(&resolved, &value));
        assert!(container.is_bound("config"));
    }

    #[test]
    fn test_forget_instance_and_instances() {
        let container = container();
        container.singleton(type_key::<SampleService>(), None);
        let first = container.make::<SampleService>().unwrap();

        container.forget_instance(type_key::<SampleService>());
        assert!(!container.is_resolved(type_key::<SampleService>()));
        let second = container.make::<SampleService>().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        container.forget_instances();
        let third = container.make::<SampleService>().unwrap();
        assert!(!Arc::ptr_eq(&second, &third));
    }

    #[test]
    fn test_hook_order_named_then_wildcard() {
        let container = container();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let log = calls.clone();
        container.before_resolving_any(move |_, _, _| {
            log.lock().unwrap().push("before:any");
            Ok(())
        });
        let log = calls.clone();
        container.before_resolving(type_key::<SampleService>(), move |_, _, _| {
            log.lock().unwrap().push("before:sample");
            Ok(())
        });
        let log = calls.clone();
        container.after_resolving_any(move |_, _| {
            log.lock().unwrap().push("after:any");
            Ok(())
        });
        let log = calls.clone();
        container.after_resolving(type_key::<SampleService>(), move |_, _| {
            log.lock().unwrap().push("after:sample");
            Ok(())
        });

        container.make::<SampleService>().unwrap();
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["before:sample", "before:any", "after:sample", "after:any"]
        );
    }

    #[test]
    fn test_after_hooks_fire_innermost_first() {
        let container = container();
        let order = Arc::new(Mutex::new(Vec::new()));

        let log = order.clone();
        container.after_resolving_any(move |instance, _| {
            let label = if instance.is::<SampleService>() {
                "sample"
            } else {
                "dependent"
            };
            log.lock().unwrap().push(label);
            Ok(())
        });

        container.make::<DependentService>().unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["sample", "dependent"]);
    }

    #[test]
    fn test_after_hooks_fire_on_cache_hit() {
        let container = Container::new();
        let count = Arc::new(Mutex::new(0));
        container.register_instance("config", Arc::new(1_u8));

        let counter = count.clone();
        container.after_resolving("config", move |_, _| {
            *counter.lock().unwrap() += 1;
            Ok(())
        });

        container.resolve("config").unwrap();
        container.resolve("config").unwrap();
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn test_before_hook_can_seed_the_cache() {
        let container = Container::new();
        let seeded: Instance = Arc::new(String::from("seeded"));

        let value = seeded.clone();
        container.before_resolving("Missing", move |abstract_ref, _, container| {
            if let Some(name) = abstract_ref.as_name() {
                container.register_instance(name, value.clone());
            }
            Ok(())
        });

        let resolved = container.resolve("Missing").unwrap();
        assert!(Arc::ptr_eq(&resolved, &seeded));
    }

    #[test]
    fn test_abandon_hooks_fire_on_failure_with_matching_depth() {
        let container = container();
        let depths = Arc::new(Mutex::new(Vec::new()));

        let log = depths.clone();
        container.abandoned_resolving_any(move |abstract_ref, container| {
            log.lock()
                .unwrap()
                .push((abstract_ref.as_name().map(str::to_owned), container.resolution_depth()));
        });

        assert!(container.resolve("Missing").is_err());
        assert_eq!(*depths.lock().unwrap(), vec![(Some("Missing".to_string()), 1)]);
        assert_eq!(container.resolution_depth(), 0);
    }

    #[test]
    fn test_other_values_pass_through() {
        let container = Container::new();
        let value: Instance = Arc::new(3_u64);
        let resolved = container.resolve(value.clone()).unwrap();
        assert!(Arc::ptr_eq(&resolved, &value));
        assert!(container.bindings().is_empty());
    }

    #[test]
    fn test_circular_dependency_is_detected() {
        struct Left;
        struct Right;

        let container = Container::new();
        container
            .catalog()
            .insert(TypeDescriptor::of::<Left, _>(
                vec![ParameterInfo::dependency::<Right>("right")],
                |_| Ok(Left),
            ))
            .insert(TypeDescriptor::of::<Right, _>(
                vec![ParameterInfo::dependency::<Left>("left")],
                |_| Ok(Right),
            ));

        let err = container.make::<Left>().err().unwrap();
        assert!(matches!(err, SingletonizeError::CircularDependency { .. }));
        // The build path unwinds cleanly, so the next attempt reports the same cycle.
        assert!(matches!(
            container.make::<Left>().err().unwrap(),
            SingletonizeError::CircularDependency { .. }
        ));
    }

    #[test]
    fn test_concurrent_first_resolutions_share_one_build() {
        use std::sync::Barrier;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::time::Duration;

        let container = Arc::new(Container::new());
        let builds = Arc::new(AtomicUsize::new(0));

        let counter = builds.clone();
        container.singleton_factory("slow", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            Ok(Arc::new(0_u64) as Instance)
        });

        let barrier = Arc::new(Barrier::new(4));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let container = container.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    container.resolve("slow").unwrap()
                })
            })
            .collect();

        let results: Vec<Instance> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        for result in &results {
            assert!(Arc::ptr_eq(result, &results[0]));
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let container = container();
        container.singleton(type_key::<SampleService>(), None);
        container.make::<SampleService>().unwrap();
        container.before_resolving_any(|_, _, _| Ok(()));

        container.reset();
        assert!(!container.is_bound(type_key::<SampleService>()));
        assert!(!container.is_resolved(type_key::<SampleService>()));
        assert_eq!(container.hooks().before_count(), 0);
    }
}
