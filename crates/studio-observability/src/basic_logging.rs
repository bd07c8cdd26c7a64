use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub(crate) const DEFAULT_FILTER: &str =
    "studio=info,studio_auth=info,studio_db=info,tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn";

pub(crate) fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Console-only logging, used when observability is disabled at build time
/// or through `OBSERVABILITY_ENABLED=false`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter());

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        eprintln!("ℹ️  Observability disabled - console logging only");
    }
}
