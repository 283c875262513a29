use super::{EnforcementPolicy, InterceptionStrategy, ResolutionStack};
use crate::config::StrategyKind;
use crate::di::{AbstractRef, Container, Instance, Parameters};
use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// Captures the first object built for each name and re-injects it.
///
/// The before-hook pushes the name being resolved (or `None` when the
/// resolution is not tracked) and the matching after-hook pops it to learn
/// which name the finished object belongs to. An object already in the
/// container's cache wins and becomes the capture, so a registered
/// replacement is honoured. Otherwise names already captured are seeded into
/// the cache before it looks, so they never reach the builder again.
#[derive(Default)]
pub struct CaptureStrategy {
    captured: DashMap<String, Instance>,
    stack: ResolutionStack<Option<String>>,
}

impl CaptureStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self, name: &str) -> Option<Instance> {
        self.captured.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }

    /// Frames waiting for their after-hook on the current thread.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}

impl InterceptionStrategy for CaptureStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Capture
    }

    fn before_resolving(
        &self,
        policy: &EnforcementPolicy,
        abstract_ref: &AbstractRef,
        parameters: &Parameters,
        container: &Container,
    ) -> Result<()> {
        let depth = container.resolution_depth();

        let Some(name) = policy.tracked_name(abstract_ref, parameters) else {
            self.stack.push(depth, None);
            return Ok(());
        };

        if let Some(cached) = container.cached_instance(name) {
            let stale = self
                .captured(name)
                .is_none_or(|captured| !Arc::ptr_eq(&captured, &cached));
            if stale {
                tracing::debug!(abstract = %name, "Captured instance taken from cache");
                self.captured.insert(name.to_owned(), cached);
            }
            return Ok(());
        }

        if let Some(instance) = self.captured(name) {
            tracing::trace!(abstract = %name, "Re-injecting captured instance");
            container.register_instance(name, instance);
            return Ok(());
        }

        self.stack.push(depth, Some(name.to_owned()));
        Ok(())
    }

    fn after_resolving(&self, instance: &Instance, container: &Container) -> Result<()> {
        // No frame at this depth: the before-hook re-injected a captured
        // instance and the cache answered.
        let Some(Some(name)) = self.stack.pop(container.resolution_depth()) else {
            return Ok(());
        };

        if self.captured.contains_key(&name) {
            return Ok(());
        }

        self.captured.insert(name.clone(), Arc::clone(instance));
        container.register_instance(name.as_str(), Arc::clone(instance));
        tracing::debug!(abstract = %name, "Captured singleton");
        Ok(())
    }

    fn abandoned(&self, abstract_ref: &AbstractRef, container: &Container) {
        if let Some(Some(name)) = self.stack.pop(container.resolution_depth()) {
            tracing::debug!(abstract = %name, "Dropped frame of failed resolution");
        } else {
            tracing::trace!(abstract = ?abstract_ref, "Failed resolution left no frame");
        }
    }

    fn forgotten(&self, name: Option<&str>, _container: &Container) {
        match name {
            Some(name) => {
                self.captured.remove(name);
            }
            None => self.captured.clear(),
        }
    }
}
