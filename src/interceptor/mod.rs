//! Resolution interceptors.
//!
//! Interceptors plug into the container through its wildcard hooks. The
//! [`SingletonEnforcer`] uses them to make every zero-parameter resolution
//! shared; the [`ResolutionLogger`] only observes.

mod capture;
mod enforcer;
mod logging;
mod rebind;
mod stack;

pub use capture::CaptureStrategy;
pub use enforcer::SingletonEnforcer;
pub use logging::ResolutionLogger;
pub use rebind::RebindStrategy;
pub use stack::ResolutionStack;

use crate::config::{SingletonizeConfig, StrategyKind};
use crate::di::{AbstractRef, Container, Instance, Parameters};
use crate::error::Result;
use std::collections::HashSet;

/// Which resolutions the enforcer is allowed to touch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnforcementPolicy {
    pub enabled: bool,
    pub ignored: HashSet<String>,
}

impl EnforcementPolicy {
    pub fn new<I, S>(enabled: bool, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled,
            ignored: ignored.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &SingletonizeConfig) -> Self {
        Self::new(config.enabled, config.ignored.iter().cloned())
    }

    /// The name to enforce for this resolution, if any.
    ///
    /// Disabled policies, non-name abstracts, ignored names and resolutions
    /// with caller parameters are left alone.
    pub fn tracked_name<'a>(
        &self,
        abstract_ref: &'a AbstractRef,
        parameters: &Parameters,
    ) -> Option<&'a str> {
        if !self.enabled || !parameters.is_empty() {
            return None;
        }
        abstract_ref
            .as_name()
            .filter(|name| !self.ignored.contains(*name))
    }
}

/// A way of turning resolutions into singletons.
///
/// The enforcer forwards every hook firing to its strategy. Only
/// `before_resolving` is mandatory; the remaining callbacks default to
/// doing nothing.
pub trait InterceptionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn before_resolving(
        &self,
        policy: &EnforcementPolicy,
        abstract_ref: &AbstractRef,
        parameters: &Parameters,
        container: &Container,
    ) -> Result<()>;

    fn after_resolving(&self, _instance: &Instance, _container: &Container) -> Result<()> {
        Ok(())
    }

    /// A resolution this strategy saw start has failed.
    fn abandoned(&self, _abstract_ref: &AbstractRef, _container: &Container) {}

    /// The container dropped cached instances (`None` means all of them).
    fn forgotten(&self, _name: Option<&str>, _container: &Container) {}
}

/// Creates the strategy selected in configuration.
pub fn strategy_for(kind: StrategyKind) -> Box<dyn InterceptionStrategy> {
    match kind {
        StrategyKind::Capture => Box::new(CaptureStrategy::new()),
        StrategyKind::Rebind => Box::new(RebindStrategy::new()),
    }
}
