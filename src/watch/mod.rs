//! Trigger layer: when to run a generation cycle
//!
//! - `SourceWatcher`: notify watcher on the wallust cache directory
//! - `AutoUpdate`: enabled/disabled state, owns the watcher and the debounce deadline
//! - `ConfigListener`: follows live edits of `auto_update` in the config file
//! - `daemon::run`: the event loop tying them to the generator

mod auto_update;
mod config_listener;
mod daemon;
mod source_watcher;

pub use auto_update::AutoUpdate;
pub use config_listener::ConfigListener;
pub use daemon::run;
pub use source_watcher::SourceWatcher;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to create file watcher: {0}")]
    Create(#[source] notify::Error),

    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
