use crate::error::{EcowebError, Result};
use crate::session::{
    DEFAULT_COOKIE_NAME, DEFAULT_COOKIE_PATH, DEFAULT_TOKEN_TTL_DAYS, check_token_ttl_days,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
/// Environment variable that replaces `api.base_url`.
pub const API_URL_ENV: &str = "ECOWEB_API_URL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EcowebConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EcowebConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            session: SessionSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl EcowebConfig {
    /// Rejects values the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(EcowebError::config("api.timeout_secs must be greater than zero"));
        }
        check_token_ttl_days(self.session.token_ttl_days)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SessionSettings {
    #[serde(default = "default_ttl_days")]
    pub token_ttl_days: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_ttl_days: default_ttl_days(),
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_ttl_days() -> i64 {
    DEFAULT_TOKEN_TTL_DAYS
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_cookie_path() -> String {
    DEFAULT_COOKIE_PATH.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
