//! Client configuration.
//!
//! Defaults match the stock frontend: 10 cases per page, 300ms search
//! debounce, notifications kept until dismissed. Values can be overridden
//! from the environment or from a JSON document.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::floor_plan::FloorPlanSwitchPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid config document: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub page_size: usize,
    pub search_debounce_ms: u64,
    pub notification_ttl_secs: Option<u64>,
    pub floor_plan_switch: FloorPlanSwitchPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            notification_ttl_secs: None,
            floor_plan_switch: FloorPlanSwitchPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Build from `INCIDENT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse a JSON config document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("INCIDENT_API_URL") {
            config.api_base_url = url;
        }
        if let Some(v) = lookup("INCIDENT_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = parse_var("INCIDENT_REQUEST_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("INCIDENT_PAGE_SIZE") {
            config.page_size = parse_var("INCIDENT_PAGE_SIZE", &v)?;
        }
        if let Some(v) = lookup("INCIDENT_SEARCH_DEBOUNCE_MS") {
            config.search_debounce_ms = parse_var("INCIDENT_SEARCH_DEBOUNCE_MS", &v)?;
        }
        if let Some(v) = lookup("INCIDENT_NOTIFICATION_TTL_SECS") {
            config.notification_ttl_secs = Some(parse_var("INCIDENT_NOTIFICATION_TTL_SECS", &v)?);
        }
        if let Some(v) = lookup("INCIDENT_FLOOR_PLAN_SWITCH") {
            config.floor_plan_switch = match v.as_str() {
                "keep_location" => FloorPlanSwitchPolicy::KeepLocation,
                "clear_location" => FloorPlanSwitchPolicy::ClearLocation,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "INCIDENT_FLOOR_PLAN_SWITCH".to_string(),
                        value: v,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size".to_string(),
                value: "0".to_string(),
            });
        }
        if self.notification_ttl_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "notification_ttl_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn notification_ttl(&self) -> Option<chrono::Duration> {
        self.notification_ttl_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .map(chrono::Duration::seconds)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
