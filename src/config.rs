//! Server configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
pub const DEFAULT_CLOCK_MAX_TICKS: u32 = 3600;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid { var: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub max_body_bytes: usize,
    /// JSON rate table replacing the built-in currency rates.
    pub rates_file: Option<PathBuf>,
    /// Upper bound on ticks one clock websocket receives.
    pub clock_max_ticks: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            rates_file: None,
            clock_max_ticks: DEFAULT_CLOCK_MAX_TICKS,
        }
    }
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `TOOLSHELF_MAX_BODY_BYTES`: default 1 MiB
    /// - `TOOLSHELF_RATES_FILE`: path to a JSON currency rate table
    /// - `TOOLSHELF_CLOCK_MAX_TICKS`: default 3600
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set but does not
    /// parse, or when a limit is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            bind_addr: env_parse("BIND_ADDR", defaults.bind_addr)?,
            port: env_parse("PORT", defaults.port)?,
            max_body_bytes: env_parse("TOOLSHELF_MAX_BODY_BYTES", defaults.max_body_bytes)?,
            rates_file: std::env::var("TOOLSHELF_RATES_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            clock_max_ticks: env_parse("TOOLSHELF_CLOCK_MAX_TICKS", defaults.clock_max_ticks)?,
        };

        if config.max_body_bytes == 0 {
            return Err(invalid("TOOLSHELF_MAX_BODY_BYTES", "0", "must be greater than zero"));
        }
        if config.clock_max_ticks == 0 {
            return Err(invalid("TOOLSHELF_CLOCK_MAX_TICKS", "0", "must be greater than zero"));
        }
        Ok(config)
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Parse `var` when set; unset or blank keeps `default`.
fn env_parse<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<T>().map_err(|e| invalid(var, &raw, &e.to_string()))
        }
        _ => Ok(default),
    }
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { var, value: value.to_owned(), reason: reason.to_owned() }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
