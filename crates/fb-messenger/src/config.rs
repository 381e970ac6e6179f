//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `fb-messenger.toml`
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the TOML file is replaced by the environment value.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MessengerError, Result};

/// Graph API endpoint the Messenger calls are made against
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v2.6/me";

/// Default config file looked up by [`MessengerConfig::load`]
pub const CONFIG_FILE: &str = "fb-messenger.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessengerConfig {
    /// Base URL every request path is joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page access token used by the CLI. Library calls take the token
    /// as an argument instead.
    #[serde(default, skip_serializing)]
    pub page_access_token: Option<String>,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_access_token: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl MessengerConfig {
    /// Replace `${VAR_NAME}` with the environment value. Unset variables
    /// expand to an empty string.
    fn expand_env_vars(value: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Some(env_value) = lookup(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path).map_err(|e| {
            MessengerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&toml_content, env_lookup)
    }

    fn from_toml_str(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let expanded = Self::expand_env_vars(content, &lookup);

        let mut config: MessengerConfig = toml::from_str(&expanded)
            .map_err(|e| MessengerError::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_overrides(&lookup);
        Ok(config)
    }

    /// Load from `fb-messenger.toml` if present, environment only otherwise
    pub fn load() -> Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        Ok(Self::from_env())
    }

    /// Load from environment variables only
    pub fn from_env() -> Self {
        Self::from_vars(env_lookup)
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(&lookup);
        config
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup("FB_GRAPH_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }

        // Unparseable values keep whatever was there before
        if let Some(secs) = lookup("FB_HTTP_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            self.timeout_secs = secs;
        }

        if let Some(token) = lookup("FB_PAGE_ACCESS_TOKEN").filter(|v| !v.is_empty()) {
            self.page_access_token = Some(token);
        }
    }

    /// Page access token, or `AccessTokenNotSet` if none is configured
    pub fn require_access_token(&self) -> Result<&str> {
        self.page_access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(MessengerError::AccessTokenNotSet)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
