//! Paragraph and text run models.

use serde::{Deserialize, Serialize};

/// Default run font size in points when `a:rPr@sz` is absent.
pub const DEFAULT_FONT_SIZE_PT: f64 = 18.0;

/// Default run font family when `a:latin` is absent.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Default run color when no fill resolves.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Start,
    Center,
    End,
    Justify,
}

impl TextAlignment {
    /// Parse an `a:pPr@algn` attribute value.
    pub fn from_algn(value: &str) -> Self {
        match value {
            "ctr" => TextAlignment::Center,
            "r" => TextAlignment::End,
            "just" => TextAlignment::Justify,
            _ => TextAlignment::Start,
        }
    }
}

/// A run of text with uniform styling and a fully resolved color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content, NFC-normalized.
    pub text: String,

    /// Font size in points.
    pub size_pt: f64,

    /// Font family name.
    pub font: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,

    /// Resolved text color as `#rrggbb`.
    pub color: String,
}

impl Default for TextRun {
    fn default() -> Self {
        Self {
            text: String::new(),
            size_pt: DEFAULT_FONT_SIZE_PT,
            font: DEFAULT_FONT_FAMILY.to_string(),
            bold: false,
            italic: false,
            color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }
}

impl TextRun {
    /// Create a plain run with default styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A paragraph of runs with block-level properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in document order.
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Text alignment.
    #[serde(default, skip_serializing_if = "is_default_alignment")]
    pub alignment: TextAlignment,

    /// Indentation level (0 = top level).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub indent_level: u8,

    /// Bullet glyph, when the paragraph is a list item. Auto-numbered
    /// lists carry the synthesized default marker, not their number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<String>,
}

fn is_default_alignment(a: &TextAlignment) -> bool {
    *a == TextAlignment::Start
}

fn is_zero(n: &u8) -> bool {
    *n == 0
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.runs.iter().all(|r| r.is_empty())
    }

    /// Font size of the tallest run, or the default for an empty
    /// paragraph. Drives the renderer's line advance.
    pub fn line_size_pt(&self) -> f64 {
        self.runs
            .iter()
            .map(|r| r.size_pt)
            .fold(None::<f64>, |acc, s| Some(acc.map_or(s, |a| a.max(s))))
            .unwrap_or(DEFAULT_FONT_SIZE_PT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_from_algn() {
        assert_eq!(TextAlignment::from_algn("l"), TextAlignment::Start);
        assert_eq!(TextAlignment::from_algn("ctr"), TextAlignment::Center);
        assert_eq!(TextAlignment::from_algn("r"), TextAlignment::End);
        assert_eq!(TextAlignment::from_algn("just"), TextAlignment::Justify);
        assert_eq!(TextAlignment::from_algn("dist"), TextAlignment::Start);
    }

    #[test]
    fn test_run_defaults() {
        let run = TextRun::plain("Hello");
        assert_eq!(run.size_pt, DEFAULT_FONT_SIZE_PT);
        assert_eq!(run.font, DEFAULT_FONT_FAMILY);
        assert_eq!(run.color, DEFAULT_TEXT_COLOR);
        assert!(!run.bold);
    }

    #[test]
    fn test_paragraph_plain_text() {
        let para = Paragraph {
            runs: vec![TextRun::plain("Hello, "), TextRun::plain("world")],
            ..Default::default()
        };
        assert_eq!(para.plain_text(), "Hello, world");
        assert!(!para.is_empty());
        assert!(Paragraph::new().is_empty());
    }

    #[test]
    fn test_line_size() {
        let mut para = Paragraph::new();
        assert_eq!(para.line_size_pt(), DEFAULT_FONT_SIZE_PT);

        para.runs.push(TextRun {
            size_pt: 24.0,
            ..TextRun::plain("big")
        });
        para.runs.push(TextRun {
            size_pt: 12.0,
            ..TextRun::plain("small")
        });
        assert_eq!(para.line_size_pt(), 24.0);
    }

    #[test]
    fn test_paragraph_serialization() {
        let para = Paragraph {
            runs: vec![TextRun::plain("Test")],
            ..Default::default()
        };
        let json = serde_json::to_string(&para).unwrap();
        // Default block properties should not be serialized
        assert!(!json.contains("alignment"));
        assert!(!json.contains("bullet"));
    }
}
