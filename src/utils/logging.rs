// file: src/utils/logging.rs
// description: Tracing subscriber initialization for agent processes and tests

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a compact fmt subscriber. `RUST_LOG` wins over the verbosity flag.
/// Returns false when a global subscriber was already set.
pub fn init_logger(colored_output: bool, verbose: bool) -> bool {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_is_idempotent() {
        init_logger(false, true);
        assert!(!init_logger(false, false));
    }
}
