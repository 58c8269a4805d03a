//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by writing a temp file and renaming it over the original still
//! trigger a reload.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::SiteConfig;

/// Watches the site config file and sends every valid new version.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<SiteConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<SiteConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Load the file now and send it if it is valid.
    pub fn reload(&self) -> bool {
        reload_into(&self.path, &self.update_tx)
    }

    /// Start watching. The returned watcher must be kept alive for as long
    /// as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name = self.path.file_name().map(OsString::from);
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let path = self.path.clone();
        let tx = self.update_tx;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_relevant(&event, file_name.as_deref()) {
                        tracing::info!(path = ?path, kind = ?event.kind, "Site config changed");
                        reload_into(&path, &tx);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

fn reload_into(path: &Path, tx: &mpsc::UnboundedSender<SiteConfig>) -> bool {
    match load_config(path) {
        Ok(config) => tx.send(config).is_ok(),
        Err(e) => {
            tracing::error!(path = ?path, error = %e, "Failed to reload config. Keeping current configuration.");
            false
        }
    }
}

/// A write, create or rename that touches the watched file.
fn is_relevant(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    match file_name {
        Some(name) => event.paths.iter().any(|p| p.file_name() == Some(name)),
        None => true,
    }
}
