//! Application Bootstrap
//!
//! Owns the container and the configuration and drives service providers
//! through their register and boot steps.

use super::{LifecycleError, Phase, Result, ServiceProvider};
use crate::config::ConfigRepository;
use crate::di::{Container, Instance, type_key};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Abstract name the configuration repository is bound under.
pub const CONFIG_BINDING: &str = "config";

/// A container plus its configuration and providers.
///
/// # Example
///
/// ```
/// use singletonize::lifecycle::{Application, SingletonizeServiceProvider};
/// use singletonize::config::ConfigRepository;
/// use std::sync::Arc;
///
/// let app = Application::new(ConfigRepository::empty());
/// app.register(SingletonizeServiceProvider).unwrap();
///
/// let config = app.make::<ConfigRepository>().unwrap();
/// assert!(Arc::ptr_eq(&config, app.config()));
/// assert!(config.has("singletonize.enabled"));
/// ```
pub struct Application {
    container: Arc<Container>,
    config: Arc<ConfigRepository>,
    providers: RwLock<Vec<Arc<dyn ServiceProvider>>>,
    booted: AtomicBool,
}

impl Application {
    /// Create a new application builder
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    /// An application that is already booted: providers registered later
    /// are booted immediately.
    pub fn new(config: ConfigRepository) -> Self {
        let app = Self::with_container(Container::new(), config);
        app.booted.store(true, Ordering::SeqCst);
        app
    }

    fn with_container(container: Container, config: ConfigRepository) -> Self {
        let container = Arc::new(container);
        let config = Arc::new(config);

        let shared: Instance = config.clone();
        container.register_instance(CONFIG_BINDING, shared);
        container.alias(CONFIG_BINDING, type_key::<ConfigRepository>());

        Self {
            container,
            config,
            providers: RwLock::new(Vec::new()),
            booted: AtomicBool::new(false),
        }
    }

    /// Get a reference to the container
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn config(&self) -> &Arc<ConfigRepository> {
        &self.config
    }

    pub fn is_booted(&self) -> bool {
        self.booted.load(Ordering::SeqCst)
    }

    /// Resolves `T` through the container.
    pub fn make<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        Ok(self.container.make::<T>()?)
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|provider| provider.name() == name)
    }

    /// Registers `provider`, booting it right away when the application is
    /// already booted. A provider whose name is already registered is
    /// skipped.
    pub fn register<P: ServiceProvider + 'static>(&self, provider: P) -> Result<()> {
        self.register_arc(Arc::new(provider))
    }

    fn register_arc(&self, provider: Arc<dyn ServiceProvider>) -> Result<()> {
        let name = provider.name().to_owned();
        if self.has_provider(&name) {
            tracing::debug!(provider = %name, "Provider already registered");
            return Ok(());
        }

        tracing::debug!(provider = %name, "Registering provider");
        provider
            .register(self)
            .map_err(|e| LifecycleError::provider_failed(&name, Phase::Register, e))?;

        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&provider));

        if self.is_booted() {
            boot_provider(self, provider.as_ref())?;
        }
        Ok(())
    }

    /// Boots every registered provider, in registration order. Calling it
    /// again does nothing.
    pub fn boot(&self) -> Result<()> {
        if self.booted.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let providers = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for provider in &providers {
            boot_provider(self, provider.as_ref())?;
        }

        tracing::info!(providers = providers.len(), "Application booted");
        Ok(())
    }
}

fn boot_provider(app: &Application, provider: &dyn ServiceProvider) -> Result<()> {
    tracing::debug!(provider = %provider.name(), "Booting provider");
    provider
        .boot(app)
        .map_err(|e| LifecycleError::provider_failed(provider.name(), Phase::Boot, e))
}

/// Builder for Application
#[derive(Default)]
pub struct ApplicationBuilder {
    container: Option<Container>,
    config: Option<ConfigRepository>,
    providers: Vec<Arc<dyn ServiceProvider>>,
}

impl ApplicationBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container
    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn config(mut self, config: ConfigRepository) -> Self {
        self.config = Some(config);
        self
    }

    pub fn provider<P: ServiceProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Registers every provider, then boots them all.
    pub fn build(self) -> Result<Application> {
        let app = Application::with_container(
            self.container.unwrap_or_default(),
            self.config.unwrap_or_default(),
        );

        for provider in self.providers {
            app.register_arc(provider)?;
        }
        app.boot()?;

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SingletonizeError;
    use std::sync::Mutex;

    struct Recording {
        name: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ServiceProvider for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn register(&self, _app: &Application) -> Result<()> {
            self.calls.lock().unwrap().push(format!("register:{}", self.name));
            Ok(())
        }

        fn boot(&self, _app: &Application) -> Result<()> {
            self.calls.lock().unwrap().push(format!("boot:{}", self.name));
            Ok(())
        }
    }

    struct Failing;

    impl ServiceProvider for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn register(&self, _app: &Application) -> Result<()> {
            Err(SingletonizeError::unresolvable_target("Missing").into())
        }
    }

    #[test]
    fn test_builder_registers_all_before_booting() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let app = Application::builder()
            .provider(Recording { name: "a", calls: calls.clone() })
            .provider(Recording { name: "b", calls: calls.clone() })
            .build()
            .unwrap();

        assert!(app.is_booted());
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["register:a", "register:b", "boot:a", "boot:b"]
        );
    }

    #[test]
    fn test_late_registration_boots_immediately_once() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let app = Application::new(ConfigRepository::empty());

        app.register(Recording { name: "a", calls: calls.clone() }).unwrap();
        app.register(Recording { name: "a", calls: calls.clone() }).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["register:a", "boot:a"]);
    }

    #[test]
    fn test_config_is_bound() {
        let app = Application::new(ConfigRepository::empty());
        let by_name = app.container().resolve(CONFIG_BINDING).unwrap();
        let by_type = app.make::<ConfigRepository>().unwrap();

        assert!(by_name.is::<ConfigRepository>());
        assert!(Arc::ptr_eq(&by_type, app.config()));
    }

    #[test]
    fn test_provider_failure_names_provider() {
        let app = Application::new(ConfigRepository::empty());
        let err = app.register(Failing).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::ProviderFailed { ref provider, phase: Phase::Register, .. } if provider == "failing"
        ));
        assert!(!app.has_provider("failing"));
    }
}
