//! Site server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser request
//!     ───────────────▶ http::server (request id, timeout, trace, metrics)
//!                          │
//!                          ▼
//!                      supabase::middleware (session refresh, page routes)
//!                          │
//!                          ▼
//!                      http::pages ──▶ ui::NavLink ──▶ routing::is_active
//!                          │              ui::Section / LearnSection
//!                          │              demo::RandomCountUp
//!                          ▼
//!     HTML response ◀── layout (fonts.css, nav bar, main)
//!
//!     config file ──▶ config::watcher ──▶ mpsc ──▶ ArcSwap<SiteState>
//! ```
//!
//! Usage: `web-starter [CONFIG_PATH]`, falling back to `SITE_CONFIG`, then
//! built-in defaults.

use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use web_starter::config::{load_or_default, ConfigWatcher};
use web_starter::http::HttpServer;
use web_starter::lifecycle::{shutdown_on_signal, Shutdown};
use web_starter::observability::{logging, metrics};

const CONFIG_ENV: &str = "SITE_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from);

    let config = load_or_default(config_path.as_deref())?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!("web-starter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        nav_entries = config.navigation.len(),
        supabase = config.supabase.url.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher alive for the lifetime of the server.
    let (_watcher, config_updates) = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown_on_signal(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
