//! Config file listener
//!
//! Watches the config file with `notify`, debounces for 500ms (editors save
//! with write + rename), reloads it and publishes `auto_update` on a
//! `tokio::sync::watch` channel. A file that no longer parses is logged and
//! the previous value stays in effect.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use super::WatchError;
use crate::config::Config;

const DEBOUNCE: Duration = Duration::from_millis(500);

pub struct ConfigListener {
    path: PathBuf,
}

impl ConfigListener {
    pub fn new(path: PathBuf) -> Self {
        if !path.exists() {
            tracing::warn!(
                "config file {} does not exist yet, will watch for creation",
                path.display()
            );
        }
        Self { path }
    }

    /// Watch until the receiving side goes away.
    pub async fn run(self, tx: watch::Sender<bool>) -> Result<(), WatchError> {
        let watch_dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        std::fs::create_dir_all(&watch_dir).map_err(|source| WatchError::CreateDir {
            path: watch_dir.clone(),
            source,
        })?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        // Bridge the sync notify callback into async
        let (notify_tx, mut notify_rx) = mpsc::channel::<()>(16);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n == file_name).unwrap_or(false));
                    if ours {
                        let _ = notify_tx.try_send(());
                    }
                }
                Err(e) => tracing::error!("config watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(WatchError::Create)?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Watch {
                path: watch_dir.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), "listening for config changes");

        loop {
            tokio::select! {
                msg = notify_rx.recv() => {
                    if msg.is_none() {
                        break;
                    }
                }
                _ = tx.closed() => break,
            }

            // Coalesce everything that arrives within the window
            let debounce = tokio::time::sleep(DEBOUNCE);
            tokio::pin!(debounce);
            loop {
                tokio::select! {
                    _ = &mut debounce => break,
                    msg = notify_rx.recv() => {
                        if msg.is_none() {
                            return Ok(());
                        }
                    }
                }
            }

            apply_reload(&self.path, &tx);
        }

        Ok(())
    }
}

/// Reload the file and publish `auto_update` if it changed.
///
/// Returns true when a new value was published.
fn apply_reload(path: &Path, tx: &watch::Sender<bool>) -> bool {
    match Config::reload(path) {
        Ok(config) => {
            let enabled = config.auto_update;
            let changed = tx.send_if_modified(|current| {
                if *current == enabled {
                    return false;
                }
                *current = enabled;
                true
            });
            if changed {
                tracing::info!(auto_update = enabled, "config reloaded");
            }
            changed
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config change, keeping previous settings");
            false
        }
    }
}
