//! Client configuration loaded from the environment

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "PULSE_API_URL";
pub const ENV_API_TOKEN: &str = "PULSE_API_TOKEN";
pub const ENV_HISTORY_LIMIT: &str = "PULSE_HISTORY_LIMIT";
pub const ENV_REQUEST_TIMEOUT: &str = "PULSE_REQUEST_TIMEOUT_SECS";
pub const ENV_SESSION_FILE: &str = "PULSE_SESSION_FILE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error("Session file error: {0}")]
    Session(String),
}

/// Token pair persisted by the sign-in flow
#[derive(Debug, Clone, Deserialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct ClientConfig {
    #[validate(url)]
    pub api_url: String,
    pub api_token: Option<String>,
    #[validate(range(min = 1, max = 500))]
    pub history_limit: usize,
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// An explicit token wins over the one stored in the session file.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let session_file = var(ENV_SESSION_FILE)
            .map(PathBuf::from)
            .or_else(default_session_path);

        let api_token = match var(ENV_API_TOKEN) {
            Some(token) => Some(token),
            None => match &session_file {
                Some(path) => read_session(path)?.map(|s| s.token),
                None => None,
            },
        };

        let config = Self {
            api_url: var(ENV_API_URL).unwrap_or(defaults.api_url),
            api_token,
            history_limit: parse_number(ENV_HISTORY_LIMIT, var(ENV_HISTORY_LIMIT))?
                .unwrap_or(defaults.history_limit),
            request_timeout_secs: parse_number(ENV_REQUEST_TIMEOUT, var(ENV_REQUEST_TIMEOUT))?
                .unwrap_or(defaults.request_timeout_secs),
            session_file,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { var, value: v })
        })
        .transpose()
}

/// Get the path to the stored session file
fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pulse-point").join("session.json"))
}

/// Read the stored session, `None` when the file does not exist
pub fn read_session(path: &Path) -> Result<Option<StoredSession>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Session(format!("Failed to read {:?}: {}", path, e)))?;

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Session(format!("Failed to parse {:?}: {}", path, e)))
}
