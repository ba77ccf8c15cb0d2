//! Color source - reads the palette wallust leaves in its cache directory
//!
//! Two files are consulted:
//! - `colors`: whitespace-separated colors, first 16 used (required)
//! - `colors.json`: optional sidecar overriding background and foreground

mod sidecar;

pub use sidecar::{Sidecar, SidecarError};

use std::path::{Path, PathBuf};

use crate::palette::{Color, ColorError, Palette, PALETTE_SIZE};

/// File name of the base palette inside the cache directory
pub const COLORS_FILE: &str = "colors";

/// File name of the JSON sidecar inside the cache directory
pub const COLORS_JSON_FILE: &str = "colors.json";

/// Errors that abort a generation cycle
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Wallust colors file not found. Run wallust first.")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("color #{index} ({token:?}) is invalid: {source}")]
    InvalidColor {
        index: usize,
        token: String,
        #[source]
        source: ColorError,
    },

    #[error("expected 16 colors, found {found}")]
    TooFewColors { found: usize },
}

/// Palette plus any non-fatal sidecar problems hit while building it
#[derive(Debug)]
pub struct LoadedPalette {
    pub palette: Palette,
    pub warnings: Vec<SidecarError>,
}

/// Locations of the wallust cache files
#[derive(Debug, Clone)]
pub struct ColorSource {
    colors_path: PathBuf,
    json_path: PathBuf,
}

impl ColorSource {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            colors_path: cache_dir.join(COLORS_FILE),
            json_path: cache_dir.join(COLORS_JSON_FILE),
        }
    }

    pub fn colors_path(&self) -> &Path {
        &self.colors_path
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    /// Both files the watcher should observe
    pub fn watched_paths(&self) -> [&Path; 2] {
        [&self.colors_path, &self.json_path]
    }

    /// Build this cycle's palette.
    ///
    /// Fails only on base file problems. Sidecar problems come back as
    /// warnings; whatever the sidecar got right is still applied.
    pub fn load(&self) -> Result<LoadedPalette, SourceError> {
        let mut palette = self.read_base_colors()?;

        let warnings = if self.json_path.exists() {
            let warnings = self.apply_sidecar(&mut palette);
            for e in &warnings {
                tracing::warn!(path = %self.json_path.display(), error = %e, "sidecar problem");
            }
            warnings
        } else {
            tracing::debug!(path = %self.json_path.display(), "no sidecar, using base palette");
            Vec::new()
        };

        Ok(LoadedPalette { palette, warnings })
    }

    /// Read and parse the base `colors` file.
    pub fn read_base_colors(&self) -> Result<Palette, SourceError> {
        let contents = match std::fs::read_to_string(&self.colors_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::Missing(self.colors_path.clone()));
            }
            Err(source) => {
                return Err(SourceError::Read {
                    path: self.colors_path.clone(),
                    source,
                });
            }
        };

        parse_base_colors(&contents)
    }

    /// Overlay `special.background`/`special.foreground` onto the palette.
    ///
    /// Each field replaces its own slot. Returns the problems hit on the way;
    /// an unreadable document leaves the palette untouched.
    pub fn apply_sidecar(&self, palette: &mut Palette) -> Vec<SidecarError> {
        let sidecar = match self.read_sidecar() {
            Ok(sidecar) => sidecar,
            Err(e) => return vec![e],
        };

        let (overrides, invalid) = sidecar.overrides();
        if overrides.is_empty() {
            tracing::debug!(path = %self.json_path.display(), "sidecar has no special colors");
        }
        overrides.apply(palette);
        invalid
    }

    fn read_sidecar(&self) -> Result<Sidecar, SidecarError> {
        let json = std::fs::read_to_string(&self.json_path).map_err(|source| SidecarError::Read {
            path: self.json_path.clone(),
            source,
        })?;
        Sidecar::parse(&json)
    }
}

/// Parse the first 16 whitespace-separated tokens as colors.
pub fn parse_base_colors(contents: &str) -> Result<Palette, SourceError> {
    let colors = contents
        .split_whitespace()
        .take(PALETTE_SIZE)
        .enumerate()
        .map(|(index, token)| {
            Color::parse(token).map_err(|source| SourceError::InvalidColor {
                index,
                token: token.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Palette::try_from(colors).map_err(|colors| SourceError::TooFewColors {
        found: colors.len(),
    })
}
