// File watcher for the wallust cache directory
//
// notify calls back on its own thread; events are reduced to a unit signal
// and pushed into a bounded tokio channel. The receiving loop does the
// debouncing.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use super::WatchError;
use crate::source::ColorSource;

/// Live watch on `colors` and `colors.json`. Dropping it stops the watch.
pub struct SourceWatcher {
    dir: PathBuf,
    _watcher: RecommendedWatcher,
}

impl SourceWatcher {
    /// Start watching the directory holding the palette files.
    ///
    /// The directory is created if missing so the watch is in place before
    /// wallust first runs.
    pub fn spawn(source: &ColorSource, tx: mpsc::Sender<()>) -> Result<Self, WatchError> {
        let dir = source
            .colors_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        std::fs::create_dir_all(&dir).map_err(|source| WatchError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let file_names: Vec<OsString> = source
            .watched_paths()
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
            .collect();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if is_relevant(&event, &file_names) {
                        tracing::trace!(kind = ?event.kind, paths = ?event.paths, "palette change");
                        // A full channel already holds a pending change
                        let _ = tx.try_send(());
                    }
                }
                Err(e) => tracing::error!("file watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(WatchError::Create)?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Watch {
                path: dir.clone(),
                source,
            })?;

        tracing::info!(dir = %dir.display(), "watching wallust cache");

        Ok(Self {
            dir,
            _watcher: watcher,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for SourceWatcher {
    fn drop(&mut self) {
        tracing::info!(dir = %self.dir().display(), "stopped watching wallust cache");
    }
}

/// Create or modify of one of the watched file names
fn is_relevant(event: &Event, file_names: &[OsString]) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }

    event.paths.iter().any(|p| {
        p.file_name()
            .map(|n| file_names.iter().any(|f| f == n))
            .unwrap_or(false)
    })
}
