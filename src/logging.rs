use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive; `RUST_LOG` takes precedence when set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "portsweep=debug"
    } else {
        "portsweep=info"
    }
}

/// Install the global subscriber. Call once, from the binary.
pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
