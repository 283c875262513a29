use super::{EnforcementPolicy, InterceptionStrategy, strategy_for};
use crate::config::{SingletonizeConfig, StrategyKind};
use crate::di::Container;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Makes every zero-parameter resolution of a container shared.
///
/// The enforcer is inert until [`SingletonEnforcer::activate`] attaches it to
/// a container. Activation happens at most once per enforcer.
///
/// # Example
/// ```
/// use singletonize::{Container, SingletonEnforcer, instance};
/// use singletonize::config::SingletonizeConfig;
/// use std::sync::Arc;
///
/// let container = Container::new();
/// container.bind_factory("clock", |_, _| Ok(instance(0_u64)));
///
/// let enforcer = Arc::new(SingletonEnforcer::from_config(&SingletonizeConfig::default()));
/// assert!(enforcer.activate(&container));
///
/// let first = container.resolve("clock").unwrap();
/// let second = container.resolve("clock").unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct SingletonEnforcer {
    policy: EnforcementPolicy,
    strategy: Box<dyn InterceptionStrategy>,
    activated: AtomicBool,
}

impl SingletonEnforcer {
    pub fn new(policy: EnforcementPolicy, strategy: Box<dyn InterceptionStrategy>) -> Self {
        Self {
            policy,
            strategy,
            activated: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &SingletonizeConfig) -> Self {
        Self::new(
            EnforcementPolicy::from_config(config),
            strategy_for(config.strategy),
        )
    }

    pub fn policy(&self) -> &EnforcementPolicy {
        &self.policy
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn is_active(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }

    /// Registers the enforcement hooks on `container`.
    ///
    /// Returns `false` without touching the container when this enforcer was
    /// already activated.
    pub fn activate(self: &Arc<Self>, container: &Container) -> bool {
        if self.activated.swap(true, Ordering::SeqCst) {
            tracing::debug!("Singleton enforcer already active");
            return false;
        }

        let enforcer = Arc::clone(self);
        container.before_resolving_any(move |abstract_ref, parameters, container| {
            enforcer
                .strategy
                .before_resolving(&enforcer.policy, abstract_ref, parameters, container)
        });

        let enforcer = Arc::clone(self);
        container.after_resolving_any(move |instance, container| {
            enforcer.strategy.after_resolving(instance, container)
        });

        let enforcer = Arc::clone(self);
        container.abandoned_resolving_any(move |abstract_ref, container| {
            enforcer.strategy.abandoned(abstract_ref, container)
        });

        let enforcer = Arc::clone(self);
        container.on_forget(move |name, container| enforcer.strategy.forgotten(name, container));

        tracing::info!(
            enabled = self.policy.enabled,
            ignored = self.policy.ignored.len(),
            strategy = %self.strategy.kind(),
            "Singleton enforcer activated"
        );
        true
    }
}
