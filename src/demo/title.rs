//! Debounced title updates.
//!
//! The first update captures the current title as the original. Each
//! update cancels the pending one; only the last update within the
//! debounce window is applied, as `({count}) {original}`.

use std::fmt::Display;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// `({count}) {title}`.
pub fn format_title(count: impl Display, title: &str) -> String {
    format!("({count}) {title}")
}

pub struct TitleSetter {
    title: watch::Sender<String>,
    original: Mutex<Option<String>>,
    pending: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

impl TitleSetter {
    pub fn new(initial_title: impl Into<String>, debounce: Duration) -> Self {
        let (title, _) = watch::channel(initial_title.into());
        Self {
            title,
            original: Mutex::new(None),
            pending: Mutex::new(None),
            debounce,
        }
    }

    /// Schedule the title for `count`. Must be called inside a tokio runtime.
    pub fn set(&self, count: impl Display) {
        let original = {
            let mut original = self.original.lock().unwrap_or_else(|e| e.into_inner());
            original
                .get_or_insert_with(|| self.title.borrow().clone())
                .clone()
        };
        let next = format_title(count, &original);

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let tx = self.title.clone();
        let delay = self.debounce;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::trace!(title = %next, "Applying debounced title");
            tx.send_replace(next);
        }));
    }

    pub fn current(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.title.subscribe()
    }
}

impl Drop for TitleSetter {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
