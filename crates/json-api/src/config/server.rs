//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Seconds to let in-flight requests finish after a stop signal
    #[arg(long, env = "SHUTDOWN_GRACE_SECONDS", default_value_t = 30_u64)]
    pub shutdown_grace_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upper bound on connection draining; `0` stops without waiting.
    #[must_use]
    pub fn shutdown_grace(&self) -> Option<Duration> {
        (self.shutdown_grace_seconds > 0).then(|| Duration::from_secs(self.shutdown_grace_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_joins_host_and_port() {
        let config = ServerRuntimeConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            shutdown_grace_seconds: 30,
        };

        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn zero_grace_stops_without_draining() {
        let config = ServerRuntimeConfig {
            host: "0.0.0.0".to_string(),
            port: 8698,
            shutdown_grace_seconds: 0,
        };

        assert_eq!(config.shutdown_grace(), None);
    }

    #[test]
    fn grace_is_measured_in_seconds() {
        let config = ServerRuntimeConfig {
            host: "0.0.0.0".to_string(),
            port: 8698,
            shutdown_grace_seconds: 45,
        };

        assert_eq!(config.shutdown_grace(), Some(Duration::from_secs(45)));
    }
}
