//! Configuration read by dotted key.
//!
//! ```
//! use singletonize::config::ConfigRepository;
//! use serde_json::json;
//!
//! let config = ConfigRepository::new(json!({ "singletonize": { "enabled": false } }));
//! assert_eq!(config.get("singletonize.enabled", json!(true)), json!(false));
//! assert_eq!(config.get("singletonize.ignored", json!([])), json!([]));
//! ```

mod error;
mod settings;

pub use error::{ConfigError, Result};
pub use settings::{CONFIG_FILE_NAME, CONFIG_KEY, SingletonizeConfig, StrategyKind, publish_default_config};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration repository backed by a JSON tree.
#[derive(Clone)]
pub struct ConfigRepository {
    items: Arc<RwLock<Value>>,
}

impl Default for ConfigRepository {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigRepository {
    pub fn new(items: Value) -> Self {
        let items = if items.is_object() {
            items
        } else {
            Value::Object(Map::new())
        };
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    /// Reads `key` (dot separated), falling back to `default` when any
    /// segment is missing.
    pub fn get(&self, key: &str, default: Value) -> Value {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        let mut value = &*items;
        for segment in key.split('.') {
            match value.get(segment) {
                Some(next) => value = next,
                None => return default,
            }
        }
        value.clone()
    }

    /// Reads and deserializes `key`; `Ok(None)` when the key is absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key, Value::Null) {
            Value::Null => Ok(None),
            value => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ConfigError::invalid_value(key, e.to_string())),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        !self.get(key, Value::Null).is_null()
    }

    /// Writes `value` at `key`, creating intermediate objects as needed.
    pub fn set(&self, key: &str, value: Value) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let mut segments: Vec<&str> = key.split('.').collect();
        let last = match segments.pop() {
            Some(last) => last,
            None => return,
        };

        let mut target = &mut *items;
        for segment in segments {
            target = ensure_object(target)
                .entry(segment.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        ensure_object(target).insert(last.to_owned(), value);
    }

    /// Fills in `defaults` under `key`; values already present win.
    pub fn merge_defaults(&self, key: &str, defaults: Value) {
        let existing = self.get(key, Value::Object(Map::new()));
        let mut merged = defaults;
        overlay(&mut merged, existing);
        self.set(key, merged);
    }

    /// Overlays a JSON file onto the repository.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;

        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        overlay(&mut *items, value);
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(())
    }

    /// Applies environment variables named `PREFIX__SECTION__KEY` as the
    /// dotted key `section.key`. Values are parsed as JSON when possible and
    /// kept as strings otherwise.
    pub fn with_env_overrides(self, prefix: &str) -> Self {
        let marker = format!("{}__", prefix);
        for (name, raw) in env::vars() {
            let Some(path) = name.strip_prefix(&marker) else {
                continue;
            };
            let key = path
                .split("__")
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(".");
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            self.set(&key, value);
        }
        self
    }

    pub fn snapshot(&self) -> Value {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// Recursively writes `top` over `base`.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base), Value::Object(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_with_default() {
        let config = ConfigRepository::new(json!({ "a": { "b": 1 } }));
        assert_eq!(config.get("a.b", json!(0)), json!(1));
        assert_eq!(config.get("a.c", json!(0)), json!(0));
        assert_eq!(config.get("a.b.c", json!("x")), json!("x"));
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let config = ConfigRepository::empty();
        config.set("singletonize.enabled", json!(false));
        assert_eq!(config.get("singletonize.enabled", json!(true)), json!(false));

        config.set("singletonize.enabled.deep", json!(1));
        assert_eq!(config.get("singletonize.enabled.deep", json!(0)), json!(1));
    }

    #[test]
    fn test_merge_defaults_keeps_existing_values() {
        let config = ConfigRepository::new(json!({ "singletonize": { "enabled": false } }));
        config.merge_defaults(
            "singletonize",
            json!({ "enabled": true, "ignored": ["Clock"] }),
        );

        assert_eq!(config.get("singletonize.enabled", json!(true)), json!(false));
        assert_eq!(config.get("singletonize.ignored", json!([])), json!(["Clock"]));
    }

    #[test]
    fn test_get_as_reports_invalid_values() {
        let config = ConfigRepository::new(json!({ "port": "not a number" }));
        assert!(config.get_as::<u16>("port").is_err());
        assert_eq!(config.get_as::<u16>("missing").unwrap(), None);
    }

    #[test]
    fn test_non_object_root_is_replaced() {
        let config = ConfigRepository::new(json!(3));
        assert_eq!(config.snapshot(), json!({}));
    }
}
