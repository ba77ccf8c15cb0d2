//! wallust `colors.json` sidecar
//!
//! Only `special.background` and `special.foreground` are read. The rest of
//! the document (wallpaper path, alpha, colorN entries) is ignored.

use serde::Deserialize;
use std::path::PathBuf;

use crate::palette::{Color, ColorError, Palette};

/// Lines containing this marker are dropped before the second parse attempt.
///
/// wallust on Windows writes the wallpaper path without escaping backslashes,
/// which makes the whole document invalid JSON. This shim only exists for
/// that producer; it is not a general JSON repair.
const UNESCAPED_PATH_MARKER: &str = "wallpaper";

#[derive(Debug, thiserror::Error)]
pub enum SidecarError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid special.{field} color: {source}")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: ColorError,
    },
}

/// The part of colors.json this crate consumes
#[derive(Debug, Default, Deserialize)]
pub struct Sidecar {
    #[serde(default)]
    pub special: Option<Special>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Special {
    pub background: Option<String>,
    pub foreground: Option<String>,
}

/// Overrides resolved from a sidecar, already parsed into colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

impl Overrides {
    pub fn apply(&self, palette: &mut Palette) {
        if let Some(bg) = self.background {
            palette.set_background(bg);
        }
        if let Some(fg) = self.foreground {
            palette.set_foreground(fg);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.foreground.is_none()
    }
}

impl Sidecar {
    /// Parse sidecar JSON, retrying once without `wallpaper` lines.
    pub fn parse(json: &str) -> Result<Self, SidecarError> {
        match serde_json::from_str(json) {
            Ok(sidecar) => Ok(sidecar),
            Err(first) => {
                tracing::debug!(error = %first, "colors.json did not parse, retrying without wallpaper lines");
                let stripped = strip_marker_lines(json);
                Ok(serde_json::from_str(&stripped)?)
            }
        }
    }

    /// Resolve each special color on its own.
    ///
    /// Absent or blank fields are skipped. A value that is not a color is
    /// reported and only its own slot loses the override.
    pub fn overrides(&self) -> (Overrides, Vec<SidecarError>) {
        let special = self.special.as_ref();
        let mut invalid = Vec::new();

        let mut field = |name: &'static str, value: Option<&str>| -> Option<Color> {
            match value.map(str::trim).filter(|v| !v.is_empty()).map(Color::parse)? {
                Ok(color) => Some(color),
                Err(source) => {
                    invalid.push(SidecarError::InvalidColor { field: name, source });
                    None
                }
            }
        };

        let overrides = Overrides {
            background: field("background", special.and_then(|s| s.background.as_deref())),
            foreground: field("foreground", special.and_then(|s| s.foreground.as_deref())),
        };

        (overrides, invalid)
    }
}

fn strip_marker_lines(json: &str) -> String {
    json.split('\n')
        .filter(|line| !line.contains(UNESCAPED_PATH_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOWS_SIDECAR: &str = r##"{
    "wallpaper": "C:\Users\me\Pictures\wall.png",
    "alpha": "100",
    "special": {
        "background": "#101010",
        "foreground": "#efefef",
        "cursor": "#efefef"
    }
}"##;

    #[test]
    fn parses_well_formed_sidecar() {
        let sidecar = Sidecar::parse(r##"{"special":{"background":"#000000","foreground":"#ffffff"}}"##)
            .unwrap();
        let (overrides, invalid) = sidecar.overrides();
        assert_eq!(overrides.background, Some(Color::rgb(0, 0, 0)));
        assert_eq!(overrides.foreground, Some(Color::rgb(255, 255, 255)));
        assert!(invalid.is_empty());
    }

    #[test]
    fn unescaped_wallpaper_path_is_stripped_and_reparsed() {
        assert!(serde_json::from_str::<serde_json::Value>(WINDOWS_SIDECAR).is_err());

        let sidecar = Sidecar::parse(WINDOWS_SIDECAR).unwrap();
        let (overrides, _) = sidecar.overrides();
        assert_eq!(overrides.background, Some(Color::rgb(0x10, 0x10, 0x10)));
        assert_eq!(overrides.foreground, Some(Color::rgb(0xef, 0xef, 0xef)));
    }

    #[test]
    fn garbage_fails_after_retry() {
        let err = Sidecar::parse("{ not json").unwrap_err();
        assert!(matches!(err, SidecarError::Json(_)));
    }

    #[test]
    fn absent_fields_are_skipped_silently() {
        let sidecar = Sidecar::parse(r##"{"special":{"background":"#111111"}}"##).unwrap();
        let (overrides, invalid) = sidecar.overrides();
        assert_eq!(overrides.background, Some(Color::rgb(0x11, 0x11, 0x11)));
        assert_eq!(overrides.foreground, None);
        assert!(invalid.is_empty());

        let sidecar = Sidecar::parse(r#"{"colors":{}}"#).unwrap();
        let (overrides, invalid) = sidecar.overrides();
        assert!(overrides.is_empty());
        assert!(invalid.is_empty());
    }

    #[test]
    fn empty_string_counts_as_absent() {
        let sidecar =
            Sidecar::parse(r##"{"special":{"background":"#101010","foreground":""}}"##).unwrap();
        let (overrides, invalid) = sidecar.overrides();
        assert_eq!(overrides.background, Some(Color::rgb(0x10, 0x10, 0x10)));
        assert_eq!(overrides.foreground, None);
        assert!(invalid.is_empty());
    }

    #[test]
    fn bad_color_value_drops_only_its_own_slot() {
        let sidecar =
            Sidecar::parse(r##"{"special":{"background":"#101010","foreground":"nope"}}"##)
                .unwrap();
        let (overrides, invalid) = sidecar.overrides();
        assert_eq!(overrides.background, Some(Color::rgb(0x10, 0x10, 0x10)));
        assert_eq!(overrides.foreground, None);
        assert_eq!(invalid.len(), 1);
        assert!(matches!(
            invalid[0],
            SidecarError::InvalidColor {
                field: "foreground",
                ..
            }
        ));
        assert!(invalid[0].to_string().starts_with("invalid special.foreground color"));
    }

    #[test]
    fn apply_touches_only_slots_zero_and_seven() {
        let mut palette = Palette::try_from(vec![Color::rgb(1, 1, 1); 16]).unwrap();
        Overrides {
            background: Some(Color::rgb(9, 9, 9)),
            foreground: Some(Color::rgb(8, 8, 8)),
        }
        .apply(&mut palette);

        for (i, c) in palette.colors().iter().enumerate() {
            match i {
                0 => assert_eq!(*c, Color::rgb(9, 9, 9)),
                7 => assert_eq!(*c, Color::rgb(8, 8, 8)),
                _ => assert_eq!(*c, Color::rgb(1, 1, 1)),
            }
        }
    }
}
