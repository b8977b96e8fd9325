use std::env;
use std::time::Duration;

/// Environment variable names
pub mod env_vars {
    pub const API_URL: &str = "MINIMD_API_URL";
    pub const TIMEOUT_SECS: &str = "MINIMD_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const API_URL: &str = "http://127.0.0.1:8080";
    pub const TIMEOUT_SECS: u64 = 10;
}

/// Where the note store lives and how long to wait for it.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Store origin, without the `/api` prefix
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_URL.to_string(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source. An unparsable timeout falls
    /// back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(env_vars::API_URL).unwrap_or_else(|| defaults::API_URL.to_string());
        let timeout_secs = match lookup(env_vars::TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "[SYNC] {} must be a whole number of seconds (got {:?}), using {}",
                    env_vars::TIMEOUT_SECS,
                    raw,
                    defaults::TIMEOUT_SECS
                );
                defaults::TIMEOUT_SECS
            }),
            None => defaults::TIMEOUT_SECS,
        };

        Self {
            timeout: Duration::from_secs(timeout_secs),
            ..Self::new(&base_url)
        }
    }
}
