//! Opt-in `tracing` setup for hosts embedding the dashboard engine.
//!
//! The library only emits events. Hosts that already run a subscriber keep
//! it; the helpers here are for small hosts and test binaries.

/// Filter applied when `RUST_LOG` is unset: engine lifecycle at `info`,
/// everything else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,certstat=info";

/// Installs a compact `fmt` subscriber honoring `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback directive,
/// e.g. `"certstat=trace"` to follow every redraw pass.
#[must_use]
pub fn init_tracing(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
