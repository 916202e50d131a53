//! Server configuration
//!
//! Defines all configurable parameters for the server including the bind
//! address, the simulated search latency, and SSE heartbeat timing.

use std::time::Duration;

/// Server configuration
///
/// Intervals are configurable so tests can run with zero search latency
/// while the deployed server keeps realistic timing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (e.g., "0.0.0.0:8080")
    pub bind_addr: String,

    /// Simulated latency of the mock search backend
    pub search_latency: Duration,

    /// How often the SSE stream sends heartbeat events
    pub heartbeat_interval: Duration,

    /// Number of job events buffered per SSE subscriber
    pub event_buffer: usize,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(bind_addr: String) -> Self {
        Self {
            bind_addr,
            search_latency: Duration::from_secs(1),
            heartbeat_interval: Duration::from_secs(30),
            event_buffer: 100,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - BIND_ADDR (optional, default: "0.0.0.0:8080")
    /// - SEARCH_LATENCY_MS (optional, default: 1000)
    /// - HEARTBEAT_INTERVAL_SECS (optional, default: 30)
    /// - EVENT_BUFFER (optional, default: 100)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let search_latency = std::env::var("SEARCH_LATENCY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(1000));

        let heartbeat_interval = std::env::var("HEARTBEAT_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let event_buffer = std::env::var("EVENT_BUFFER")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(100);

        let config = Self {
            bind_addr,
            search_latency,
            heartbeat_interval,
            event_buffer,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.heartbeat_interval.as_secs() == 0 {
            anyhow::bail!("heartbeat_interval must be greater than 0");
        }

        if self.event_buffer == 0 {
            anyhow::bail!("event_buffer must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("0.0.0.0:8080".to_string())
    }
}
