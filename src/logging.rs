use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise debug builds log this crate at
/// `debug` and release builds only surface warnings.
pub fn init() {
    let fallback = if cfg!(debug_assertions) {
        "warn,kitchen_orders=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Stdout carries the summaries; keep log lines off it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_target(false)
        .try_init();
}
