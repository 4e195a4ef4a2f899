use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; the settings file can
/// raise it to `debug`, and with debug enabled `RUST_LOG` may override the
/// filter entirely.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        // Force `info` so a stray RUST_LOG in the environment cannot turn
        // on verbose output the user did not ask for.
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
