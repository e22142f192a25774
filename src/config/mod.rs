
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("BANK_HOST [{0}] is not an IP address")]
    InvalidHost(String),
    #[error("BANK_PORT [{0}] is not a port number")]
    InvalidPort(String)
}

/// Process settings, read from `BANK_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub address: SocketAddr,
    pub log_level: LevelFilter,
    /// CSV of `account_number,balance` rows opened at startup.
    pub seed_path: Option<PathBuf>
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        let host = lookup("BANK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host.trim().parse().map_err(|_| ConfigError::InvalidHost(host.clone()))?;

        let port = match lookup("BANK_PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(port.clone()))?,
            None => DEFAULT_PORT
        };

        let log_level = lookup("BANK_LOG_LEVEL")
            .map(|level| parse_log_level(&level))
            .unwrap_or(LevelFilter::INFO);

        let seed_path = lookup("BANK_SEED_CSV")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            address: SocketAddr::new(host, port),
            log_level,
            seed_path
        })
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            //NOTE: Logging is not set up yet when configuration is read
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}
