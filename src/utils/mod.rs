pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "budget_buddy=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// A non-empty, valid `RUST_LOG` is used as-is; otherwise the crate's own
/// events are shown at `info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
