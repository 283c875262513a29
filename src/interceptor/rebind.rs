use super::{EnforcementPolicy, InterceptionStrategy};
use crate::config::StrategyKind;
use crate::di::{AbstractRef, Concrete, Container, Factory, Instance, Parameters};
use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// Rewrites each binding into a shared, self-caching factory the first time
/// its name is resolved without parameters.
///
/// The factory wraps the original concrete. Parameterized calls skip the
/// cache and always build through the original. A name is wrapped again
/// whenever its current binding is not the wrapper installed for it, which
/// covers both a reset and the user re-binding the name.
#[derive(Default)]
pub struct RebindStrategy {
    wrappers: DashMap<String, Factory>,
}

impl RebindStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rebound(&self, name: &str) -> bool {
        self.wrappers.contains_key(name)
    }

    /// Whether the binding for `name` is still the wrapper this strategy
    /// installed.
    fn is_wrapped(&self, name: &str, container: &Container) -> bool {
        let Some(wrapper) = self.wrappers.get(name) else {
            return false;
        };
        match container.bindings().get(name) {
            Some(record) => match &record.concrete {
                Concrete::Factory(factory) => Arc::ptr_eq(factory, wrapper.value()),
                Concrete::Name(_) => false,
            },
            None => false,
        }
    }

    fn rebind(&self, name: &str, container: &Container) {
        let mut installed = None;
        container.bindings().rewrite(name, |record| {
            let wrapper = self_caching(name.to_owned(), record.concrete.clone());
            record.shared = true;
            record.concrete = Concrete::Factory(Arc::clone(&wrapper));
            installed = Some(wrapper);
        });

        if let Some(wrapper) = installed {
            self.wrappers.insert(name.to_owned(), wrapper);
        }
        tracing::debug!(abstract = %name, "Rebound as self-caching singleton");
    }
}

impl InterceptionStrategy for RebindStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Rebind
    }

    fn before_resolving(
        &self,
        policy: &EnforcementPolicy,
        abstract_ref: &AbstractRef,
        parameters: &Parameters,
        container: &Container,
    ) -> Result<()> {
        let Some(name) = policy.tracked_name(abstract_ref, parameters) else {
            return Ok(());
        };

        if self.is_wrapped(name, container) {
            return Ok(());
        }

        self.rebind(name, container);
        Ok(())
    }
}

fn self_caching(owner: String, original: Concrete) -> Factory {
    Arc::new(
        move |container: &Container, parameters: &Parameters| -> Result<Instance> {
            if parameters.is_empty() {
                if let Some(instance) = container.cached_instance(&owner) {
                    return Ok(instance);
                }
            }

            let instance = match &original {
                Concrete::Name(target) if !original.is_buildable_for(&owner) => {
                    container.resolve_with(target.as_str(), parameters)?
                }
                concrete => container.build(concrete, parameters)?,
            };

            if parameters.is_empty() {
                container.register_instance(owner.as_str(), instance.clone());
            }
            Ok(instance)
        },
    )
}
