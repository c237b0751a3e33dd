use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "farm_advisor_core";

/// Install a global tracing subscriber for the embedding application.
///
/// A valid `RUST_LOG` replaces the built-in levels entirely. Otherwise this
/// crate logs at `debug` when `verbose` and at `warn` when not; other targets
/// log at `warn`. Calling it twice is harmless; the second call is ignored.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().without_time())
        .with(log_filter(rust_log.as_deref(), verbose))
        .try_init();
}

/// The filter `init_logging` installs, given the raw `RUST_LOG` value.
/// Blank or unparsable directives fall back to the built-in levels.
pub fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(directives) = rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    if verbose {
        EnvFilter::new(format!("warn,{CRATE_TARGET}=debug"))
    } else {
        EnvFilter::new("warn")
    }
}
