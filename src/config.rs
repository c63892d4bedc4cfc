//! Configuration management for Quote Sync

use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub remote: RemoteConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    pub sync_interval_secs: u64,
    /// No timeout when unset; a hung fetch only stalls its own cycle
    pub timeout_secs: Option<u64>,
    /// Category assigned to remote entries that arrive without one
    pub default_category: String,
    /// Forward newly added quotes to the remote endpoint
    pub post_new_quotes: bool,
}

impl RemoteConfig {
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            remote: RemoteConfig {
                url: DEFAULT_REMOTE_URL.to_string(),
                sync_interval_secs: 60,
                timeout_secs: None,
                default_category: "Uncategorized".to_string(),
                post_new_quotes: true,
            },
            database: DatabaseConfig {
                url: "sqlite:./quotes.db".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or unparsable values
    /// take their defaults individually
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Config {
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: var("SERVER_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            remote: RemoteConfig {
                url: var("REMOTE_URL")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(defaults.remote.url),
                sync_interval_secs: var("SYNC_INTERVAL_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.remote.sync_interval_secs),
                timeout_secs: var("REMOTE_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
                default_category: var("REMOTE_DEFAULT_CATEGORY")
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or(defaults.remote.default_category),
                post_new_quotes: var("POST_NEW_QUOTES")
                    .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                    .unwrap_or(defaults.remote.post_new_quotes),
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL").unwrap_or(defaults.database.url),
            },
        }
    }
}
