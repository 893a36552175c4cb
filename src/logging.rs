//! Tracing subscriber bootstrap.
//!
//! Hosts that already install their own subscriber can skip this; the
//! crate only ever emits through `tracing` macros.

/// Install a stderr subscriber honoring `RUST_LOG` (default `info`).
///
/// Safe to call when a subscriber is already installed; the second
/// install is ignored.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
