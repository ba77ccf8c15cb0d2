//! One generation cycle: load the palette, write both themes, report.

use std::path::PathBuf;

use crate::logging::Notifier;
use crate::source::{ColorSource, SourceError};
use crate::writer::ThemeWriter;

/// Prefix for cycle-aborting errors other than the missing palette file
const GENERATION_FAILED: &str = "Theme generation failed: ";

/// What a single cycle did
#[derive(Debug, Default)]
pub struct CycleOutcome {
    pub written: Vec<PathBuf>,
    pub warnings: usize,
    pub failed: usize,
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Clone)]
pub struct Generator {
    source: ColorSource,
    writer: ThemeWriter,
}

impl Generator {
    pub fn new(source: ColorSource, writer: ThemeWriter) -> Self {
        Self { source, writer }
    }

    pub fn source(&self) -> &ColorSource {
        &self.source
    }

    pub fn writer(&self) -> &ThemeWriter {
        &self.writer
    }

    /// Run a full cycle. Never panics and never retries; every problem is
    /// handed to `notifier` and counted in the outcome.
    pub fn run(&self, notifier: &dyn Notifier) -> CycleOutcome {
        let mut outcome = CycleOutcome::default();

        let loaded = match self.source.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!(error = %e, "generation aborted");
                notifier.error(&generation_error_message(&e));
                outcome.failed = 1;
                return outcome;
            }
        };

        for warning in &loaded.warnings {
            notifier.warn(&format!("Could not process colors.json: {warning}"));
        }
        outcome.warnings = loaded.warnings.len();

        let report = self.writer.write_all(&loaded.palette);
        if report.is_complete() {
            tracing::info!(
                written = report.written.len(),
                warnings = outcome.warnings,
                "generation finished"
            );
        } else {
            tracing::warn!(
                written = report.written.len(),
                failed = report.failed.len(),
                "generation finished with write failures"
            );
        }

        for failure in &report.failed {
            notifier.error(&format!("Failed to write theme file: {failure}"));
        }
        outcome.failed = report.failed.len();
        outcome.written = report.written;

        outcome
    }
}

fn generation_error_message(error: &SourceError) -> String {
    match error {
        SourceError::Missing(_) => error.to_string(),
        other => format!("{GENERATION_FAILED}{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{NoticeBuffer, Severity};
    use crate::source::tests::BASE_COLORS;
    use crate::theme::Variant;
    use serde_json::Value;
    use std::path::Path;

    fn generator(root: &Path) -> Generator {
        let cache = root.join("cache");
        std::fs::create_dir_all(&cache).unwrap();
        Generator::new(ColorSource::new(&cache), ThemeWriter::new(root.join("themes")))
    }

    fn theme_color(generator: &Generator, variant: Variant, key: &str) -> String {
        let json = std::fs::read_to_string(generator.writer().path_for(variant)).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        value["colors"][key].as_str().unwrap().to_string()
    }

    #[test]
    fn base_file_only_writes_both_themes() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        std::fs::write(generator.source().colors_path(), BASE_COLORS).unwrap();

        let notices = NoticeBuffer::new();
        let outcome = generator.run(&notices);

        assert!(outcome.is_success());
        assert_eq!(outcome.written.len(), 2);
        assert!(notices.get_all().is_empty());
        for variant in Variant::ALL {
            assert_eq!(theme_color(&generator, variant, "editor.background"), "#1a1b26");
            assert_eq!(theme_color(&generator, variant, "editor.foreground"), "#c0caf5");
        }
    }

    #[test]
    fn sidecar_overrides_background_and_foreground() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        std::fs::write(generator.source().colors_path(), BASE_COLORS).unwrap();
        std::fs::write(
            generator.source().json_path(),
            r##"{"special": {"background": "#101010", "foreground": "#efefef"}}"##,
        )
        .unwrap();

        let notices = NoticeBuffer::new();
        let outcome = generator.run(&notices);

        assert!(outcome.is_success());
        assert_eq!(outcome.warnings, 0);
        assert_eq!(theme_color(&generator, Variant::Plain, "editor.background"), "#101010");
        assert_eq!(theme_color(&generator, Variant::Plain, "editor.foreground"), "#efefef");
        assert_eq!(theme_color(&generator, Variant::Plain, "terminal.ansiBlack"), "#101010");
    }

    #[test]
    fn broken_sidecar_warns_and_keeps_base_palette() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        std::fs::write(generator.source().colors_path(), BASE_COLORS).unwrap();
        std::fs::write(generator.source().json_path(), "{ not json").unwrap();

        let notices = NoticeBuffer::new();
        let outcome = generator.run(&notices);

        assert!(outcome.is_success());
        assert_eq!(outcome.warnings, 1);
        let all = notices.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Warning);
        assert!(all[0].message.starts_with("Could not process colors.json: "));
        assert_eq!(theme_color(&generator, Variant::Plain, "editor.background"), "#1a1b26");
    }

    #[test]
    fn missing_base_file_reports_once_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());

        let notices = NoticeBuffer::new();
        let outcome = generator.run(&notices);

        assert!(!outcome.is_success());
        assert!(outcome.written.is_empty());
        let all = notices.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Error);
        assert_eq!(all[0].message, "Wallust colors file not found. Run wallust first.");
        assert!(!generator.writer().themes_dir().exists());
    }

    #[test]
    fn malformed_base_file_is_prefixed() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        std::fs::write(generator.source().colors_path(), "#000000\n#ffffff\n").unwrap();

        let notices = NoticeBuffer::new();
        let outcome = generator.run(&notices);

        assert_eq!(outcome.failed, 1);
        assert_eq!(notices.count(Severity::Error), 1);
        assert!(notices.get_all()[0].message.starts_with(GENERATION_FAILED));
    }

    #[test]
    fn write_failure_is_reported_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        std::fs::write(generator.source().colors_path(), BASE_COLORS).unwrap();
        std::fs::create_dir_all(generator.writer().path_for(Variant::Bordered)).unwrap();

        let notices = NoticeBuffer::new();
        let outcome = generator.run(&notices);

        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.written, vec![generator.writer().path_for(Variant::Plain)]);
        let all = notices.get_all();
        assert_eq!(all.len(), 1);
        assert!(all[0].message.starts_with("Failed to write theme file: "));
    }

    #[test]
    fn repeated_runs_produce_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        std::fs::write(generator.source().colors_path(), BASE_COLORS).unwrap();

        let notices = NoticeBuffer::new();
        generator.run(&notices);
        let first = std::fs::read(generator.writer().path_for(Variant::Bordered)).unwrap();
        generator.run(&notices);
        let second = std::fs::read(generator.writer().path_for(Variant::Bordered)).unwrap();

        assert_eq!(first, second);
    }
}
