//! Runtime configuration.
//!
//! Defaults suit the demo and the tests; each value can be overridden from the
//! environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `NOORA_STORE_BUFFER` | Mailbox capacity of each collection actor | 32 |
//! | `NOORA_CHANGE_FEED_CAPACITY` | Notifications a subscriber may lag behind | 64 |
//! | `NOORA_DASHBOARD_BUFFER` | Mailbox capacity of the dashboard engine | 16 |
//! | `NOORA_REFRESH_TIMEOUT_MS` | Bound on one refresh's reads, `0` for none | 30000 |

use std::time::Duration;
use thiserror::Error;

pub const STORE_BUFFER_VAR: &str = "NOORA_STORE_BUFFER";
pub const CHANGE_FEED_CAPACITY_VAR: &str = "NOORA_CHANGE_FEED_CAPACITY";
pub const DASHBOARD_BUFFER_VAR: &str = "NOORA_DASHBOARD_BUFFER";
pub const REFRESH_TIMEOUT_VAR: &str = "NOORA_REFRESH_TIMEOUT_MS";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NooraConfig {
    pub store_buffer: usize,
    pub change_feed_capacity: usize,
    pub dashboard_buffer: usize,
    /// `None` lets a hung read keep the dashboard loading indefinitely.
    pub refresh_timeout: Option<Duration>,
}

impl Default for NooraConfig {
    fn default() -> Self {
        Self {
            store_buffer: 32,
            change_feed_capacity: 64,
            dashboard_buffer: 16,
            refresh_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl NooraConfig {
    /// Defaults overridden by any `NOORA_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let capacity = |key: &'static str, default: usize| -> Result<usize, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => match raw.trim().parse::<usize>() {
                    Ok(n) if n > 0 => Ok(n),
                    _ => Err(ConfigError::Invalid { key, value: raw }),
                },
            }
        };

        let refresh_timeout = match lookup(REFRESH_TIMEOUT_VAR) {
            None => defaults.refresh_timeout,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        key: REFRESH_TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            store_buffer: capacity(STORE_BUFFER_VAR, defaults.store_buffer)?,
            change_feed_capacity: capacity(CHANGE_FEED_CAPACITY_VAR, defaults.change_feed_capacity)?,
            dashboard_buffer: capacity(DASHBOARD_BUFFER_VAR, defaults.dashboard_buffer)?,
            refresh_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = NooraConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, NooraConfig::default());
        assert_eq!(config.refresh_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_overrides() {
        let config = NooraConfig::from_lookup(lookup(&[
            (STORE_BUFFER_VAR, "8"),
            (DASHBOARD_BUFFER_VAR, " 4 "),
            (REFRESH_TIMEOUT_VAR, "250"),
        ]))
        .unwrap();
        assert_eq!(config.store_buffer, 8);
        assert_eq!(config.dashboard_buffer, 4);
        assert_eq!(config.change_feed_capacity, 64);
        assert_eq!(config.refresh_timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = NooraConfig::from_lookup(lookup(&[(REFRESH_TIMEOUT_VAR, "0")])).unwrap();
        assert_eq!(config.refresh_timeout, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert_eq!(
            NooraConfig::from_lookup(lookup(&[(CHANGE_FEED_CAPACITY_VAR, "0")])),
            Err(ConfigError::Invalid {
                key: CHANGE_FEED_CAPACITY_VAR,
                value: "0".into()
            })
        );
        assert!(NooraConfig::from_lookup(lookup(&[(REFRESH_TIMEOUT_VAR, "soon")])).is_err());
    }
}
