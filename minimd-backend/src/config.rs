use std::env;
use std::path::{Path, PathBuf};

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Upper bound on a JSON request body, in bytes.
    pub const MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const BIND_ADDRESS: &str = "127.0.0.1";
    pub const DATABASE_URL: &str = "./.db/minimd.db";
    pub const MAX_BODY_BYTES: usize = 1024 * 1024;
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub database_url: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::BIND_ADDRESS.to_string(),
            port: defaults::PORT,
            database_url: defaults::DATABASE_URL.to_string(),
            max_body_bytes: defaults::MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source. Unparsable numbers fall back
    /// to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or_default(&lookup, env_vars::PORT, defaults::PORT);
        let max_body_bytes =
            parse_or_default(&lookup, env_vars::MAX_BODY_BYTES, defaults::MAX_BODY_BYTES);

        Self {
            bind_address: lookup(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            port,
            database_url: lookup(env_vars::DATABASE_URL)
                .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            max_body_bytes,
        }
    }
}

/// Directory that has to exist before `database_url` can be opened. `None`
/// for `:memory:` and bare file names.
pub fn database_dir(database_url: &str) -> Option<PathBuf> {
    if database_url == ":memory:" {
        return None;
    }
    Path::new(database_url)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} must be a valid number (got {:?}), using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
