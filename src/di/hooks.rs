//! Resolution hooks.
//!
//! Hooks are registered against one abstract name or against every name.
//! Name-specific hooks always fire before wildcard hooks, each group in
//! registration order.

use super::container::Container;
use super::instance::{AbstractRef, Instance, Parameters};
use crate::error::Result;
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub type BeforeHook = Arc<dyn Fn(&AbstractRef, &Parameters, &Container) -> Result<()> + Send + Sync>;
pub type AfterHook = Arc<dyn Fn(&Instance, &Container) -> Result<()> + Send + Sync>;

/// Fired when a resolution whose before-hooks started unwinds with an error.
pub type AbandonHook = Arc<dyn Fn(&AbstractRef, &Container) + Send + Sync>;

/// Fired when cached instances are dropped: `Some(name)` for one, `None` for all.
pub type ForgetHook = Arc<dyn Fn(Option<&str>, &Container) + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HookTarget {
    Any,
    Name(String),
}

impl From<&str> for HookTarget {
    fn from(name: &str) -> Self {
        HookTarget::Name(name.to_owned())
    }
}

impl From<String> for HookTarget {
    fn from(name: String) -> Self {
        HookTarget::Name(name)
    }
}

#[derive(Default)]
pub struct HookDispatcher {
    before: DashMap<HookTarget, Vec<BeforeHook>>,
    after: DashMap<HookTarget, Vec<AfterHook>>,
    abandon: DashMap<HookTarget, Vec<AbandonHook>>,
    forget: RwLock<Vec<ForgetHook>>,
}

// Hooks are cloned out before they run so a hook may call back into the
// container without holding a map guard.
fn snapshot<H: Clone>(map: &DashMap<HookTarget, Vec<H>>, abstract_ref: &AbstractRef) -> Vec<H> {
    let mut hooks = Vec::new();
    if let Some(name) = abstract_ref.as_name() {
        if let Some(named) = map.get(&HookTarget::Name(name.to_owned())) {
            hooks.extend(named.iter().cloned());
        }
    }
    if let Some(any) = map.get(&HookTarget::Any) {
        hooks.extend(any.iter().cloned());
    }
    hooks
}

impl HookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_before(&self, target: HookTarget, hook: BeforeHook) {
        self.before.entry(target).or_default().push(hook);
    }

    pub fn add_after(&self, target: HookTarget, hook: AfterHook) {
        self.after.entry(target).or_default().push(hook);
    }

    pub fn add_abandon(&self, target: HookTarget, hook: AbandonHook) {
        self.abandon.entry(target).or_default().push(hook);
    }

    pub fn add_forget(&self, hook: ForgetHook) {
        self.forget
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    pub fn fire_before(
        &self,
        abstract_ref: &AbstractRef,
        parameters: &Parameters,
        container: &Container,
    ) -> Result<()> {
        for hook in snapshot(&self.before, abstract_ref) {
            hook(abstract_ref, parameters, container)?;
        }
        Ok(())
    }

    pub fn fire_after(
        &self,
        abstract_ref: &AbstractRef,
        instance: &Instance,
        container: &Container,
    ) -> Result<()> {
        for hook in snapshot(&self.after, abstract_ref) {
            hook(instance, container)?;
        }
        Ok(())
    }

    pub fn fire_abandon(&self, abstract_ref: &AbstractRef, container: &Container) {
        for hook in snapshot(&self.abandon, abstract_ref) {
            hook(abstract_ref, container);
        }
    }

    pub fn fire_forget(&self, name: Option<&str>, container: &Container) {
        let hooks = self
            .forget
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for hook in hooks {
            hook(name, container);
        }
    }

    pub fn clear(&self) {
        self.before.clear();
        self.after.clear();
        self.abandon.clear();
        self.forget
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn before_count(&self) -> usize {
        self.before.iter().map(|entry| entry.len()).sum()
    }

    pub fn after_count(&self) -> usize {
        self.after.iter().map(|entry| entry.len()).sum()
    }
}
