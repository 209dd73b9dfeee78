use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default directive used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Initializes the global tracing subscriber for a binary.
///
/// The filter is taken from `RUST_LOG` when present, falling back to
/// [`DEFAULT_FILTER`]. Panics if a global subscriber was already installed,
/// which indicates a double initialization bug in the caller.
pub fn init_tracing(service_name: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("telemetry initialized for service '{service_name}'");
}

/// Initializes tracing for tests.
///
/// Unlike [`init_tracing`], this function is safe to call from every test in a
/// binary. Only the first call installs the subscriber, all subsequent calls
/// are no-ops.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
