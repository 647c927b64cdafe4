//! Decoded slide and visual element models.

use serde::{Deserialize, Serialize};

use crate::geometry::Frame;
use crate::model::Paragraph;

/// Default slide background when no fill resolves.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// A positioned text box with decoded paragraphs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,

    /// Box fill color, when the shape declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    /// Box outline color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,

    /// Outline width in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width_pt: Option<f64>,
}

/// A filled and/or stroked shape without text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeBlock {
    pub frame: Frame,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width_pt: Option<f64>,
}

/// A positioned reference to an extracted media asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PictureRef {
    pub frame: Frame,

    /// Part path of the resolved asset in the media table.
    pub resource: String,
}

/// One visual element of a slide.
///
/// A closed set of variants so every rendering branch is exhaustive;
/// a new element kind cannot be silently mishandled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VisualElement {
    Text(TextBlock),
    Shape(ShapeBlock),
    Picture(PictureRef),
}

impl VisualElement {
    /// The element's canvas-space frame.
    pub fn frame(&self) -> &Frame {
        match self {
            VisualElement::Text(t) => &t.frame,
            VisualElement::Shape(s) => &s.frame,
            VisualElement::Picture(p) => &p.frame,
        }
    }

    /// Check if this element is a picture.
    pub fn is_picture(&self) -> bool {
        matches!(self, VisualElement::Picture(_))
    }
}

/// A fully decoded slide, ready to render.
///
/// Built and consumed within one slide's processing; nothing here
/// outlives the decode-then-render step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedSlide {
    /// Resolved background color as `#rrggbb`.
    pub background: String,

    /// Elements in paint order: earlier entries paint first.
    pub elements: Vec<VisualElement>,
}

impl Default for DecodedSlide {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            elements: Vec::new(),
        }
    }
}
