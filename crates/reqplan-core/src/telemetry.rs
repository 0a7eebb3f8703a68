//! Tracing setup
//!
//! Library code only emits `tracing` events. Binaries and tests that want to
//! see them call [`init`] once; later calls are no-ops.

use crate::config::PlannerConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to the
/// configured directive
///
/// Returns false when a global subscriber was already installed.
pub fn init(config: &PlannerConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let config = PlannerConfig::new().with_log_filter("reqplan_core=debug");
        init(&config);
        assert!(!init(&config));
    }
}
