use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the config says anything.
pub const DEFAULT_FILTER: &str = "info";

/// Picks the filter directive: the configured level if there is one, the
/// default otherwise.
pub fn filter_directive(configured: &str) -> &str {
    if configured.trim().is_empty() {
        DEFAULT_FILTER
    } else {
        configured
    }
}

/// Sets up console logging. `RUST_LOG` takes priority over `level`.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
