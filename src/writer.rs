//! Theme file writer
//!
//! Writes both variants into the themes directory. Each file is handled on
//! its own: a failure on one does not stop or undo the other.

use std::path::{Path, PathBuf};

use crate::palette::Palette;
use crate::theme::{self, Variant};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create themes directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {variant:?} theme: {source}")]
    Serialize {
        variant: Variant,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-file results of one `write_all` call
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteError>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ThemeWriter {
    themes_dir: PathBuf,
}

impl ThemeWriter {
    pub fn new(themes_dir: impl Into<PathBuf>) -> Self {
        Self {
            themes_dir: themes_dir.into(),
        }
    }

    pub fn themes_dir(&self) -> &Path {
        &self.themes_dir
    }

    pub fn path_for(&self, variant: Variant) -> PathBuf {
        self.themes_dir.join(variant.file_name())
    }

    /// Create the themes directory (and parents) if missing.
    pub fn ensure_dir(&self) -> Result<(), WriteError> {
        std::fs::create_dir_all(&self.themes_dir).map_err(|source| WriteError::CreateDir {
            path: self.themes_dir.clone(),
            source,
        })
    }

    /// Render and write every variant.
    pub fn write_all(&self, palette: &Palette) -> WriteReport {
        let mut report = WriteReport::default();

        // Individual writes still get attempted; they surface their own errors
        if let Err(e) = self.ensure_dir() {
            tracing::warn!(dir = %self.themes_dir().display(), error = %e, "themes directory unavailable");
        }

        for variant in Variant::ALL {
            match self.write_variant(palette, variant) {
                Ok(path) => {
                    tracing::debug!(path = %path.display(), "theme written");
                    report.written.push(path);
                }
                Err(e) => {
                    tracing::error!(error = %e, ?variant, "theme write failed");
                    report.failed.push(e);
                }
            }
        }

        report
    }

    fn write_variant(&self, palette: &Palette, variant: Variant) -> Result<PathBuf, WriteError> {
        let json = theme::render(palette, variant)
            .to_pretty_json()
            .map_err(|source| WriteError::Serialize { variant, source })?;

        let path = self.path_for(variant);
        std::fs::write(&path, json).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{parse_base_colors, tests::BASE_COLORS};

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ThemeWriter::new(dir.path().join("a").join("themes"));
        writer.ensure_dir().unwrap();
        writer.ensure_dir().unwrap();
        assert!(writer.themes_dir().is_dir());
    }

    #[test]
    fn writes_both_variants() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ThemeWriter::new(dir.path().join("themes"));
        let palette = parse_base_colors(BASE_COLORS).unwrap();

        let report = writer.write_all(&palette);
        assert!(report.is_complete());
        assert_eq!(report.written.len(), 2);

        for variant in Variant::ALL {
            let written = std::fs::read_to_string(writer.path_for(variant)).unwrap();
            let expected = theme::render(&palette, variant).to_pretty_json().unwrap();
            assert_eq!(written, expected);
        }
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ThemeWriter::new(dir.path());
        std::fs::write(writer.path_for(Variant::Plain), "stale and much longer than nothing")
            .unwrap();

        let palette = parse_base_colors(BASE_COLORS).unwrap();
        writer.write_all(&palette);

        let written = std::fs::read_to_string(writer.path_for(Variant::Plain)).unwrap();
        assert!(written.starts_with('{'));
        assert!(!written.contains("stale"));
    }

    #[test]
    fn one_failed_file_does_not_block_the_other() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ThemeWriter::new(dir.path());
        // A directory where the plain theme file should go makes that write fail
        std::fs::create_dir(writer.path_for(Variant::Plain)).unwrap();

        let palette = parse_base_colors(BASE_COLORS).unwrap();
        let report = writer.write_all(&palette);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.written, vec![writer.path_for(Variant::Bordered)]);
        assert!(writer.path_for(Variant::Bordered).is_file());
    }
}
