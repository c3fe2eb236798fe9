//! Subscriber installation plus the span and event vocabulary every crate
//! logs with.

pub mod events;
pub mod spans;

use mnemo_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Overrides `observability.log_level` when set.
pub const LOG_ENV: &str = "MNEMO_LOG";

/// Filter for `config`, with `MNEMO_LOG` taking precedence. An unparsable
/// level falls back to `info`.
pub fn filter_for(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber described by `config`: JSON lines with
/// thread ids and source locations, or compact text when `json_logs` is off.
///
/// Returns false when a subscriber is already installed, so embedders and
/// test binaries can call it more than once.
pub fn init(config: &ObservabilityConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(config))
        .with_target(true);
    if config.json_logs {
        builder
            .json()
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .is_ok()
    } else {
        builder.compact().try_init().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let config = ObservabilityConfig {
            json_logs: false,
            log_level: "debug".into(),
            ..Default::default()
        };
        let first = init(&config);
        assert!(!init(&config) || !first);
    }
}
