//! Logging and timing for meshtool build tooling
//!
//! - Structured logging with tracing, filtered by `RUST_LOG` or a configured level
//! - Operation timing

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level`. Log lines go to
/// stderr so stdout stays free for command output.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", config.log_level, e))?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        tracing::subscriber::set_global_default(registry.with(layer.json()))
    } else {
        tracing::subscriber::set_global_default(registry.with(layer.compact()))
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.log_level,
        "Logging initialized"
    );

    Ok(())
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
    pub show_target: bool,
    pub show_file: bool,
    pub show_line_number: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

impl TelemetryConfig {
    /// Configuration with the given default level
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            log_level: level.into(),
            ..Self::default()
        }
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Time elapsed so far
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "warn");
        assert!(!config.json);
    }

    #[test]
    fn test_with_level() {
        let config = TelemetryConfig::with_level("debug");
        assert_eq!(config.log_level, "debug");
        assert!(!config.show_target);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed().as_millis() >= 10);
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }
}
