use super::{ConfigError, ConfigRepository, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{AsRefStr, Display, EnumString};

/// Root key of the enforcement settings.
pub const CONFIG_KEY: &str = "singletonize";

/// File written by [`publish_default_config`].
pub const CONFIG_FILE_NAME: &str = "singletonize.json";

/// Which interception strategy enforces singletons.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StrategyKind {
    /// Capture each first result on the after-hook and re-inject it.
    #[default]
    Capture,
    /// Rewrite each binding into a self-caching factory.
    Rebind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonizeConfig {
    pub enabled: bool,
    pub ignored: Vec<String>,
    pub strategy: StrategyKind,
}

impl Default for SingletonizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignored: Vec::new(),
            strategy: StrategyKind::default(),
        }
    }
}

impl SingletonizeConfig {
    /// Reads the settings under [`CONFIG_KEY`], defaulting every missing key.
    pub fn from_repository(config: &ConfigRepository) -> Result<Self> {
        let enabled_key = format!("{}.enabled", CONFIG_KEY);
        let enabled = truthy(&enabled_key, config.get(&enabled_key, Value::Bool(true)))?;

        let ignored = config
            .get_as::<Vec<String>>(&format!("{}.ignored", CONFIG_KEY))?
            .unwrap_or_default();

        let strategy_key = format!("{}.strategy", CONFIG_KEY);
        let strategy = match config.get(&strategy_key, Value::Null) {
            Value::Null => StrategyKind::default(),
            Value::String(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid_value(&strategy_key, format!("unknown strategy '{}'", raw)))?,
            other => {
                return Err(ConfigError::invalid_value(
                    &strategy_key,
                    format!("expected a string, found {}", other),
                ));
            }
        };

        Ok(Self {
            enabled,
            ignored,
            strategy,
        })
    }

    /// The defaults as a JSON object, ready for `merge_defaults`.
    pub fn defaults() -> Value {
        json!({
            "enabled": true,
            "ignored": [],
            "strategy": StrategyKind::default().as_ref(),
        })
    }
}

// Flags coming from files or the environment are not always real booleans.
fn truthy(key: &str, value: Value) -> Result<bool> {
    match value {
        Value::Bool(flag) => Ok(flag),
        Value::Null => Ok(false),
        Value::Number(number) => Ok(number.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "off" | "no" => Ok(false),
            "1" | "true" | "on" | "yes" => Ok(true),
            _ => Err(ConfigError::invalid_value(key, format!("'{}' is not a boolean", raw))),
        },
        other => Err(ConfigError::invalid_value(
            key,
            format!("expected a boolean, found {}", other),
        )),
    }
}

/// Writes the default settings file into `dir` unless one already exists.
pub fn publish_default_config(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let path = dir.join(CONFIG_FILE_NAME);

    if path.exists() {
        tracing::debug!(path = %path.display(), "Configuration already published");
        return Ok(path);
    }

    fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;
    let body = serde_json::to_string_pretty(&json!({ CONFIG_KEY: SingletonizeConfig::defaults() }))
        .map_err(|e| ConfigError::parse(&path, e))?;
    fs::write(&path, body).map_err(|e| ConfigError::io(&path, e))?;

    tracing::info!(path = %path.display(), "Published default configuration");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unconfigured() {
        let config = SingletonizeConfig::from_repository(&ConfigRepository::empty()).unwrap();
        assert_eq!(config, SingletonizeConfig::default());
        assert!(config.enabled);
        assert_eq!(config.strategy, StrategyKind::Capture);
    }

    #[test]
    fn test_reads_configured_values() {
        let repository = ConfigRepository::new(json!({
            "singletonize": {
                "enabled": "false",
                "ignored": ["Clock", "RequestContext"],
                "strategy": "Rebind"
            }
        }));

        let config = SingletonizeConfig::from_repository(&repository).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.ignored, vec!["Clock", "RequestContext"]);
        assert_eq!(config.strategy, StrategyKind::Rebind);
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        let repository = ConfigRepository::new(json!({ "singletonize": { "strategy": "eager" } }));
        let err = SingletonizeConfig::from_repository(&repository).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_strategy_kind_strings() {
        assert_eq!(StrategyKind::Capture.to_string(), "capture");
        assert_eq!("rebind".parse::<StrategyKind>().unwrap(), StrategyKind::Rebind);
    }
}
