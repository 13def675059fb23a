//! Configuration management for Netscribe Server

use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub notifications: NotificationConfig,
    pub shutdown: ShutdownConfig,
    pub inventory: InventoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Bound of the document notification queue
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShutdownConfig {
    /// How long in-flight requests may run after a shutdown signal
    pub grace_period_secs: u64,
    /// How long the background worker may spend draining queued documents
    pub worker_drain_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Pre-seed the server inventory with example entries
    pub seed_servers: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl ShutdownConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }

    pub fn worker_drain(&self) -> Duration {
        Duration::from_secs(self.worker_drain_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            notifications: NotificationConfig { queue_capacity: 64 },
            shutdown: ShutdownConfig {
                grace_period_secs: 10,
                worker_drain_secs: 3,
            },
            inventory: InventoryConfig { seed_servers: true },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source, falling back to
    /// defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var(&lookup, "SERVER_PORT", defaults.server.port)?,
            },
            notifications: NotificationConfig {
                queue_capacity: parse_var(
                    &lookup,
                    "NOTIFY_QUEUE_CAPACITY",
                    defaults.notifications.queue_capacity,
                )?,
            },
            shutdown: ShutdownConfig {
                grace_period_secs: parse_var(
                    &lookup,
                    "SHUTDOWN_GRACE_SECS",
                    defaults.shutdown.grace_period_secs,
                )?,
                worker_drain_secs: parse_var(
                    &lookup,
                    "WORKER_DRAIN_SECS",
                    defaults.shutdown.worker_drain_secs,
                )?,
            },
            inventory: InventoryConfig {
                seed_servers: parse_var(&lookup, "SEED_SERVERS", defaults.inventory.seed_servers)?,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}
