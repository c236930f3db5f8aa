//! Session configuration.
use std::env;
use std::str::FromStr;

use dbt_core::{DbtConfig, ResetPolicy};

use crate::events::EventBus;

/// Configuration of a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub dbt: DbtConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = EventBus::DEFAULT_CAPACITY;

    pub fn new(dbt: DbtConfig) -> Self {
        Self {
            dbt,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DBT_RESET_POLICY` - `at_max` or `past_max` (default: at_max)
    /// - `DBT_EVENT_BUFFER` - Event capacity per topic (default: 100)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, keyed by environment variable name.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = read_value::<ResetPolicy>(&lookup, "DBT_RESET_POLICY") {
            self.dbt.reset_policy = policy;
        }
        if let Some(capacity) = read_value::<usize>(&lookup, "DBT_EVENT_BUFFER") {
            self.event_buffer_size = capacity.max(1);
        }
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(DbtConfig::default())
    }
}

fn read_value<T: FromStr>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(target: "runtime::config", key, value = %raw, "Ignoring invalid environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::default().with_overrides(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_follow_the_event_bus() {
        let config = RuntimeConfig::default();
        assert_eq!(config.event_buffer_size, EventBus::DEFAULT_CAPACITY);
        assert_eq!(config.dbt.reset_policy, ResetPolicy::AtMax);
    }

    #[test]
    fn no_variables_keep_defaults() {
        assert_eq!(overrides(&[]), RuntimeConfig::default());
    }

    #[test]
    fn reset_policy_parses_case_insensitively() {
        let config = overrides(&[("DBT_RESET_POLICY", "past_max")]);
        assert_eq!(config.dbt.reset_policy, ResetPolicy::PastMax);

        let config = overrides(&[("DBT_RESET_POLICY", " PAST_MAX ")]);
        assert_eq!(config.dbt.reset_policy, ResetPolicy::PastMax);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let config = overrides(&[
            ("DBT_RESET_POLICY", "sometimes"),
            ("DBT_EVENT_BUFFER", "lots"),
        ]);
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn event_buffer_is_at_least_one() {
        let config = overrides(&[("DBT_EVENT_BUFFER", "0")]);
        assert_eq!(config.event_buffer_size, 1);

        let config = overrides(&[("DBT_EVENT_BUFFER", "16")]);
        assert_eq!(config.event_buffer_size, 16);
    }

    #[test]
    fn from_env_reads_process_environment() {
        // Only this test touches these variables in the process environment
        unsafe {
            env::set_var("DBT_RESET_POLICY", "past_max");
            env::set_var("DBT_EVENT_BUFFER", "0");
        }
        let config = RuntimeConfig::from_env();
        unsafe {
            env::remove_var("DBT_RESET_POLICY");
            env::remove_var("DBT_EVENT_BUFFER");
        }

        assert_eq!(config.dbt.reset_policy, ResetPolicy::PastMax);
        assert_eq!(config.event_buffer_size, 1);
    }

    #[test]
    fn overrides_apply_on_top_of_existing_values() {
        let base = RuntimeConfig::new(DbtConfig::new().with_reset_policy(ResetPolicy::PastMax));
        let config = base.with_overrides(|key| (key == "DBT_EVENT_BUFFER").then(|| "8".to_owned()));

        assert_eq!(config.dbt.reset_policy, ResetPolicy::PastMax);
        assert_eq!(config.event_buffer_size, 8);
    }
}
