//! Client configuration.
//!
//! Read from a TOML file (`pawlike.toml` by default):
//!
//! ```toml
//! version = "1"
//!
//! [api]
//! base_url = "${PAWLIKE_API_URL}"
//! timeout_secs = 10
//! ```
//!
//! `${VAR}` references are expanded from the environment before validation.

use crate::error::{ClientError, ClientResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const API_URL_ENV: &str = "PAWLIKE_API_URL";
pub const TIMEOUT_ENV: &str = "PAWLIKE_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved, validated client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8080/api/v1`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            ClientError::Config(msg) => ClientError::config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn from_toml_str(raw: &str) -> ClientResult<Self> {
        let mut file: ConfigFile =
            toml::from_str(raw).map_err(|e| ClientError::config(format!("invalid TOML: {e}")))?;
        file.expand_env()?;
        file.into_config()
    }

    /// Build from `PAWLIKE_API_URL` and the optional `PAWLIKE_TIMEOUT_SECS`.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .map_err(|_| ClientError::config(format!("{API_URL_ENV} is not set")))?;
        let config = Self::new(&base_url)?;

        match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    ClientError::config(format!("{TIMEOUT_ENV} must be a whole number of seconds"))
                })?;
                Ok(config.with_timeout(timeout_from_secs(secs)?))
            }
            Err(_) => Ok(config),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    version: String,
    api: ApiSection,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiSection {
    base_url: String,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl ConfigFile {
    fn expand_env(&mut self) -> ClientResult<()> {
        self.api.base_url = expand_env_vars(&self.api.base_url)?;
        Ok(())
    }

    fn into_config(self) -> ClientResult<ClientConfig> {
        if self.version.trim() != "1" {
            return Err(ClientError::config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        let config = ClientConfig::new(&self.api.base_url)?;
        match self.api.timeout_secs {
            Some(secs) => Ok(config.with_timeout(timeout_from_secs(secs)?)),
            None => Ok(config),
        }
    }
}

fn timeout_from_secs(secs: u64) -> ClientResult<Duration> {
    if secs == 0 {
        return Err(ClientError::config("api.timeout_secs must be greater than 0"));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_base_url(raw: &str) -> ClientResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ClientError::config("api.base_url must not be empty"));
    }
    let url = Url::parse(raw)
        .map_err(|e| ClientError::config(format!("invalid api.base_url {raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::config(format!(
            "api.base_url must be an http(s) URL: {raw}"
        )));
    }
    Ok(url)
}

fn expand_env_vars(input: &str) -> ClientResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                return Err(ClientError::config(format!(
                    "unterminated env var reference: ${{{key}}}"
                )));
            }
            if key.is_empty() {
                return Err(ClientError::config("invalid env var reference: ${}"));
            }

            let value = std::env::var(&key).map_err(|_| {
                ClientError::config(format!("missing env var for config expansion: {key}"))
            })?;
            out.push_str(&value);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
