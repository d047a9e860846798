//! TOML application configuration.
//!
//! Stored at `~/.config/timeclock/config.toml`. Holds the workday
//! policy, the holiday list for the calendar gate, the poll interval,
//! and the external submit command.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::calendar::default_holidays;
use crate::error::ConfigError;
use crate::policy::WorkdayPolicy;

/// External submission collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Command that performs the site interaction for one punch. Exit
    /// status zero is the confirmation signal; only then is the punch
    /// recorded in the ledger.
    #[serde(default)]
    pub command: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timeclock/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Minutes between evaluations in watch mode.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_minutes: u64,
    /// Dates the calendar gate excludes in addition to weekends.
    #[serde(default = "holidays_default")]
    pub holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub policy: WorkdayPolicy,
    #[serde(default)]
    pub submit: SubmitConfig,
}

fn default_poll_interval() -> u64 {
    5
}

fn holidays_default() -> Vec<NaiveDate> {
    default_holidays()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_minutes: default_poll_interval(),
            holidays: holidays_default(),
            policy: WorkdayPolicy::default(),
            submit: SubmitConfig::default(),
        }
    }
}

impl AppConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/timeclock"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(match current {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a config value by key and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not fit
    /// the key's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        set_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }
}

fn set_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<(), ConfigError> {
    let mut parts = key.split('.').peekable();
    let mut current = root;
    while let Some(part) = parts.next() {
        let obj = current
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        if parts.peek().is_none() {
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let new_value = coerce(existing, value).map_err(|message| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    message,
                }
            })?;
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }
        current = obj
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }
    Err(ConfigError::UnknownKey(key.to_string()))
}

/// Parse `value` into the JSON type the key currently holds.
fn coerce(existing: &serde_json::Value, value: &str) -> Result<serde_json::Value, String> {
    use serde_json::Value;
    Ok(match existing {
        Value::Bool(_) => Value::Bool(
            value
                .parse::<bool>()
                .map_err(|_| format!("cannot parse '{value}' as bool"))?,
        ),
        Value::Number(_) => {
            if let Ok(n) = value.parse::<i64>() {
                Value::Number(n.into())
            } else if let Ok(n) = value.parse::<f64>() {
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot parse '{value}' as number"))?
            } else {
                return Err(format!("cannot parse '{value}' as number"));
            }
        }
        Value::Array(_) | Value::Object(_) => {
            serde_json::from_str(value).map_err(|e| e.to_string())?
        }
        // Strings, and null for optional string keys.
        _ => Value::String(value.to_string()),
    })
}
