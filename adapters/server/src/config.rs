//! Environment-driven server configuration.

use std::{
    env,
    net::{AddrParseError, IpAddr, SocketAddr},
};

use thiserror::Error;

/// Host used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
/// Port used when `PORT` is unset or unparsable.
pub const DEFAULT_PORT: u16 = 8080;

/// Reasons the server configuration could not be assembled.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `BIND_ADDR` does not name an IP address.
    #[error("BIND_ADDR `{value}` is not an IP address")]
    InvalidBindAddr {
        /// Raw value read from the environment.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: AddrParseError,
    },
}

/// Settings for the HTTP listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket the server binds to.
    pub listen: SocketAddr,
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let ip: IpAddr = host
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: host.clone(),
                source,
            })?;
        let port = read_port(lookup("PORT"));

        Ok(Self {
            listen: SocketAddr::new(ip, port),
        })
    }
}

fn read_port(value: Option<String>) -> u16 {
    let Some(value) = value else {
        return DEFAULT_PORT;
    };
    match value.parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => {
            tracing::warn!(
                "PORT ({}) is not a valid port. Falling back to {}.",
                value,
                DEFAULT_PORT
            );
            DEFAULT_PORT
        }
    }
}
