use crate::config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SingletonizeError>;

#[derive(Debug, Error)]
pub enum SingletonizeError {
    #[error("Target type [{target}] does not exist")]
    UnresolvableTarget { target: String },

    #[error("Target type [{target}] is not instantiable")]
    NotInstantiable { target: String },

    #[error("Unresolvable dependency resolving [{target}] parameter [{parameter}]")]
    UnresolvableDependency { target: String, parameter: String },

    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    #[error("Argument [{parameter}] of [{target}] is not a {expected}")]
    InvalidArgument {
        target: String,
        parameter: String,
        expected: String,
    },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    /// A factory could not read its configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SingletonizeError {
    pub fn unresolvable_target(target: impl Into<String>) -> Self {
        Self::UnresolvableTarget {
            target: target.into(),
        }
    }

    pub fn not_instantiable(target: impl Into<String>) -> Self {
        Self::NotInstantiable {
            target: target.into(),
        }
    }

    pub fn unresolvable_dependency(target: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::UnresolvableDependency {
            target: target.into(),
            parameter: parameter.into(),
        }
    }
}
