//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Resolve the log filter from `RUST_LOG` or the configured level
//!
//! # Design Decisions
//! - `RUST_LOG` wins over config so operators can raise verbosity without edits
//! - Initialization is idempotent; a second call is ignored

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor a config level is usable.
pub const DEFAULT_FILTER: &str = "web_starter=debug,tower_http=debug";

/// Build the filter directive for a configured log level.
pub fn filter_for_level(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        lvl @ ("trace" | "debug" | "info" | "warn" | "error") => {
            format!("web_starter={lvl},tower_http={lvl}")
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global subscriber.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_level(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
