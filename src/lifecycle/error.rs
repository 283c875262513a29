//! Lifecycle-specific error types

use crate::config::ConfigError;
use crate::error::SingletonizeError;
use strum_macros::Display;
use thiserror::Error;

/// The provider step that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Register,
    Boot,
}

/// Errors that can occur while registering or booting providers
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Container(#[from] SingletonizeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A provider step failed
    #[error("Provider {provider} failed during {phase}: {source}")]
    ProviderFailed {
        provider: String,
        phase: Phase,
        #[source]
        source: Box<LifecycleError>,
    },
}

impl LifecycleError {
    pub fn provider_failed(provider: impl Into<String>, phase: Phase, source: LifecycleError) -> Self {
        Self::ProviderFailed {
            provider: provider.into(),
            phase,
            source: Box::new(source),
        }
    }
}

/// A specialized Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;
