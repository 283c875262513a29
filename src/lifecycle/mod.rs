//! Application lifecycle.
//!
//! Providers are registered first and booted afterwards, so a provider's
//! boot step can rely on everything every other provider registered.
//!
//! ```text
//! 1. Configuration loading
//!    ↓
//! 2. Container creation, config bound as "config"
//!    ↓
//! 3. ServiceProvider::register (each provider)
//!    ↓
//! 4. ServiceProvider::boot (each provider)
//! ```
//!
//! # Example
//!
//! ```
//! use singletonize::lifecycle::{Application, SingletonizeServiceProvider};
//! use singletonize::config::ConfigRepository;
//!
//! let app = Application::builder()
//!     .config(ConfigRepository::empty())
//!     .provider(SingletonizeServiceProvider)
//!     .build()
//!     .expect("application boots");
//!
//! assert!(app.is_booted());
//! ```

mod application;
mod error;
mod provider;

pub use application::{Application, ApplicationBuilder, CONFIG_BINDING};
pub use error::{LifecycleError, Phase, Result};
pub use provider::{ServiceProvider, SingletonizeServiceProvider};
