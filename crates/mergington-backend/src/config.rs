use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::services::CapacityPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid HOST {0:?}: expected an IP address")]
    InvalidHost(String),
    #[error("Invalid PORT {0:?}: expected a number between 0 and 65535")]
    InvalidPort(String),
    #[error("Invalid ENFORCE_CAPACITY {0:?}: expected true or false")]
    InvalidFlag(String),
}

/// Runtime settings for the server, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub capacity: CapacityPolicy,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            capacity: CapacityPolicy::Unenforced,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    /// Loads `.env` if one exists, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host))?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(flag) = lookup("ENFORCE_CAPACITY") {
            config.capacity = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => CapacityPolicy::Enforced,
                "0" | "false" | "no" | "" => CapacityPolicy::Unenforced,
                _ => return Err(ConfigError::InvalidFlag(flag)),
            };
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
