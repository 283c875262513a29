//! # Singletonize
//!
//! A dependency resolution container with before/after resolution hooks, and
//! a [`SingletonEnforcer`] that uses those hooks to make every zero-parameter
//! resolution a shared singleton, whatever the original binding declared.
//!
//! ## Features
//!
//! - **Container**: bindings, aliases, an instance cache and constructor
//!   injection through a [`TypeLocator`]
//! - **Hooks**: before, after, abandon and forget callbacks per name or for
//!   every name
//! - **Singleton enforcement**: capture-and-reinject or rebinding strategies,
//!   configurable with an ignore list
//! - **Lifecycle**: service providers with register and boot steps
//!
//! ## Quick Start
//!
//! ```rust
//! use singletonize::prelude::*;
//!
//! #[derive(Constructable)]
//! pub struct Transport;
//!
//! #[derive(Constructable)]
//! pub struct Mailer {
//!     transport: Arc<Transport>,
//! }
//!
//! let app = Application::builder()
//!     .config(ConfigRepository::empty())
//!     .provider(SingletonizeServiceProvider)
//!     .build()
//!     .unwrap();
//!
//! app.container().register_type::<Transport>().register_type::<Mailer>();
//!
//! let first = app.make::<Mailer>().unwrap();
//! let second = app.make::<Mailer>().unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! assert!(Arc::ptr_eq(&first.transport, &app.make::<Transport>().unwrap()));
//! ```

extern crate self as singletonize;

pub mod config;
pub mod di;
pub mod error;
pub mod interceptor;
pub mod lifecycle;

// Re-export core types
pub use di::{
    AbstractRef, Concrete, Constructable, Container, ContainerBuilder, Instance, Parameters,
    TypeDescriptor, TypeLocator, instance, trait_instance, type_key,
};
pub use error::{Result, SingletonizeError};
pub use interceptor::{InterceptionStrategy, ResolutionLogger, SingletonEnforcer};

// Re-export macros
pub use singletonize_macro::Constructable;

/// Prelude module for convenient imports
///
/// ```
/// use singletonize::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Constructable;
    pub use crate::config::{ConfigRepository, SingletonizeConfig, StrategyKind};
    pub use crate::di::{
        AbstractRef, Arguments, Concrete, Container, ContainerBuilder, Instance, ParameterInfo,
        Parameters, TypeCatalog, TypeDescriptor, TypeLocator, instance, trait_instance, type_key,
    };
    pub use crate::error::{Result, SingletonizeError};
    pub use crate::interceptor::{
        CaptureStrategy, EnforcementPolicy, InterceptionStrategy, RebindStrategy,
        ResolutionLogger, SingletonEnforcer,
    };
    pub use crate::lifecycle::{
        Application, ApplicationBuilder, LifecycleError, ServiceProvider,
        SingletonizeServiceProvider,
    };
    pub use std::sync::Arc;
}
