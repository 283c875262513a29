use super::{Application, Result};
use crate::config::{self, CONFIG_KEY, ConfigRepository, SingletonizeConfig};
use crate::di::{instance, type_key};
use crate::interceptor::SingletonEnforcer;
use std::path::{Path, PathBuf};

/// A unit of application setup.
///
/// `register` only binds things into the container. `boot` runs once every
/// provider has registered and may resolve anything.
pub trait ServiceProvider: Send + Sync {
    fn name(&self) -> &str;

    fn register(&self, app: &Application) -> Result<()>;

    fn boot(&self, _app: &Application) -> Result<()> {
        Ok(())
    }
}

/// Installs the [`SingletonEnforcer`] on the application's container.
///
/// The enforcer is bound as a singleton built from the `singletonize`
/// configuration section and activated on boot.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingletonizeServiceProvider;

impl SingletonizeServiceProvider {
    /// Writes the default configuration file into `dir`.
    pub fn publish(dir: impl AsRef<Path>) -> config::Result<PathBuf> {
        config::publish_default_config(dir)
    }
}

impl ServiceProvider for SingletonizeServiceProvider {
    fn name(&self) -> &str {
        "singletonize"
    }

    fn register(&self, app: &Application) -> Result<()> {
        app.config()
            .merge_defaults(CONFIG_KEY, SingletonizeConfig::defaults());

        // Invalid settings fail registration.
        SingletonizeConfig::from_repository(app.config())?;

        app.container()
            .singleton_factory(type_key::<SingletonEnforcer>(), |container, _| {
                let config = container.make::<ConfigRepository>()?;
                let settings = SingletonizeConfig::from_repository(&config)?;
                Ok(instance(SingletonEnforcer::from_config(&settings)))
            });
        Ok(())
    }

    fn boot(&self, app: &Application) -> Result<()> {
        let enforcer = app.make::<SingletonEnforcer>()?;
        if enforcer.activate(app.container()) {
            tracing::info!(strategy = %enforcer.strategy_kind(), "Singleton enforcement booted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::lifecycle::LifecycleError;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_boot_activates_enforcer_once() {
        let app = Application::new(ConfigRepository::empty());
        app.register(SingletonizeServiceProvider).unwrap();

        let enforcer = app.make::<SingletonEnforcer>().unwrap();
        assert!(enforcer.is_active());
        assert!(Arc::ptr_eq(&enforcer, &app.make::<SingletonEnforcer>().unwrap()));

        // Booting a second time must not stack another set of hooks.
        let hooks = app.container().hooks().before_count();
        SingletonizeServiceProvider.boot(&app).unwrap();
        assert_eq!(app.container().hooks().before_count(), hooks);
    }

    #[test]
    fn test_register_merges_defaults() {
        let app = Application::new(ConfigRepository::new(json!({
            "singletonize": { "strategy": "rebind" }
        })));
        app.register(SingletonizeServiceProvider).unwrap();

        assert_eq!(app.config().get("singletonize.enabled", json!(false)), json!(true));
        let enforcer = app.make::<SingletonEnforcer>().unwrap();
        assert_eq!(enforcer.strategy_kind(), StrategyKind::Rebind);
    }

    #[test]
    fn test_invalid_settings_fail_registration() {
        let app = Application::new(ConfigRepository::new(json!({
            "singletonize": { "enabled": "sometimes" }
        })));
        let err = app.register(SingletonizeServiceProvider).unwrap_err();
        assert!(matches!(err, LifecycleError::ProviderFailed { .. }));
    }
}
