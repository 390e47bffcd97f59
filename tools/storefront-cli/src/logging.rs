//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output with `--verbose`. Logs go to stderr so they never mix with
/// command output; `--json` switches them to JSON lines.
pub fn setup_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // try_init: a second call (e.g. from tests) is not an error
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
