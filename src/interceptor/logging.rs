use super::ResolutionStack;
use crate::di::{AbstractRef, Container};
use std::sync::Arc;
use std::time::Instant;

/// Logs every resolution with its duration and nesting depth.
#[derive(Default)]
pub struct ResolutionLogger {
    started: ResolutionStack<(String, Instant)>,
}

impl ResolutionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(self: &Arc<Self>, container: &Container) {
        let logger = Arc::clone(self);
        container.before_resolving_any(move |abstract_ref, parameters, container| {
            let depth = container.resolution_depth();
            tracing::debug!(
                abstract = ?abstract_ref,
                parameters = parameters.len(),
                depth,
                "--> resolving"
            );
            logger.started.push(depth, (label(abstract_ref), Instant::now()));
            Ok(())
        });

        let logger = Arc::clone(self);
        container.after_resolving_any(move |_, container| {
            let depth = container.resolution_depth();
            if let Some((name, start)) = logger.started.pop(depth) {
                tracing::debug!(abstract = %name, depth, elapsed = ?start.elapsed(), "<-- resolved");
            }
            Ok(())
        });

        let logger = Arc::clone(self);
        container.abandoned_resolving_any(move |_, container| {
            let depth = container.resolution_depth();
            if let Some((name, start)) = logger.started.pop(depth) {
                tracing::warn!(abstract = %name, depth, elapsed = ?start.elapsed(), "<-- resolution failed");
            }
        });
    }

    /// Resolutions still in flight on the current thread.
    pub fn in_flight(&self) -> usize {
        self.started.len()
    }
}

fn label(abstract_ref: &AbstractRef) -> String {
    match abstract_ref.as_name() {
        Some(name) => name.to_owned(),
        None => "<value>".to_owned(),
    }
}
