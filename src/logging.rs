use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Variable holding the log filter; `RUST_LOG` is used when it is unset.
pub const LOG_ENV: &str = "SUBDUE_LOG";

/// Log to stderr so stdout stays usable for `eval "$(mysub ...)"`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
