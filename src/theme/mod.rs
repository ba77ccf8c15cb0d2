// Theme renderer - palette to VS Code color theme document
//
// Rendering is a pure function of (palette, variant). The template is fixed;
// only which colors land in it changes. Key order follows the template
// (serde_json `preserve_order`), so the same input always serializes to the
// same bytes.

mod tokens;
mod workbench;

use serde::Serialize;
use serde_json::{json, Value};

use crate::palette::Palette;

/// Which of the two shipped themes to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Borders blend into the background
    Plain,
    /// Visible borders around panels, tabs and bars
    Bordered,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Plain, Variant::Bordered];

    /// Output file name inside the themes directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Variant::Plain => "wallust.json",
            Variant::Bordered => "wallust-bordered.json",
        }
    }

    /// Theme label shown in the editor's theme picker
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Plain => "Wallust",
            Variant::Bordered => "Wallust Bordered",
        }
    }

    pub fn is_bordered(&self) -> bool {
        matches!(self, Variant::Bordered)
    }
}

/// Rendered theme, ready to serialize
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ThemeDocument(Value);

impl ThemeDocument {
    /// Serialize with a four-space indent.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.0.serialize(&mut serializer)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Render the palette into a theme document.
pub fn render(palette: &Palette, variant: Variant) -> ThemeDocument {
    let kind = if palette.background().is_dark() {
        "dark"
    } else {
        "light"
    };

    ThemeDocument(json!({
        "name": variant.label(),
        "type": kind,
        "semanticHighlighting": true,
        "colors": workbench::colors(palette, variant),
        "tokenColors": tokens::token_colors(palette),
        "semanticTokenColors": tokens::semantic_token_colors(palette),
    }))
}
