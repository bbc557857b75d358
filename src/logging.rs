use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable taking an `EnvFilter` directive, e.g. `gbrowse=trace`
pub const ENV_LOG: &str = "GBROWSE_LOG";

/// Level used when `GBROWSE_LOG` is not set
pub fn log_level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Initialize logging to stderr. Stdout is kept for the printed url.
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(format!("gbrowse={}", log_level(debug))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
