//! Environment-driven settings for the server and the HTTP client.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DATA_DIR_VAR: &str = "DISCLOSURES_DATA_DIR";
pub const BIND_VAR: &str = "DISCLOSURES_BIND";
pub const BASE_URL_VAR: &str = "DISCLOSURES_BASE_URL";
pub const TIMEOUT_VAR: &str = "DISCLOSURES_TIMEOUT_SECS";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for `disclosures serve`.
#[derive(Clone, Debug, PartialEq)]
pub struct ServeConfig {
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind: default_bind(),
        }
    }
}

impl ServeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let bind = match lookup(BIND_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", BIND_VAR, raw, DEFAULT_BIND);
                default_bind()
            }),
            None => default_bind(),
        };
        Self { data_dir, bind }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

/// Settings for the commands that talk to a running server.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = lookup_u64(&lookup, TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// A client for `base_url` with the configured timeout.
    pub fn client(&self) -> disclosure_api::Client {
        disclosure_api::Client::with_base_url(&self.base_url).with_timeout(self.timeout)
    }
}

fn lookup_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
