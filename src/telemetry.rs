//! Tracing setup.
//!
//! Logs go to stderr so a service's stdout carries only its own output.

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Standardized span constructors for service observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span covering a service's whole startup.
    pub fn startup(service: &'static str) -> Span {
        info_span!("startup", service = %service)
    }

    /// Span covering a bootstrap seed run.
    pub fn seed(entity: &'static str) -> Span {
        info_span!("seed", entity = %entity)
    }
}
