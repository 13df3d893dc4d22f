//! Logging setup utilities for the Hiroba chat relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVER_CRATE: &str = "hiroba_server";

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server library crate, this shared crate and the
/// binary itself. `RUST_LOG` overrides it entirely when set.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hiroba-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// The binary directive is skipped when the binary shares its name with
/// the server library crate.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let level = default_log_level;
    let mut targets = vec![
        SERVER_CRATE.to_string(),
        env!("CARGO_PKG_NAME").replace('-', "_"),
    ];
    let bin = binary_name.replace('-', "_");
    if !targets.contains(&bin) {
        targets.push(bin);
    }
    targets.push("tower_http".to_string());

    targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}
