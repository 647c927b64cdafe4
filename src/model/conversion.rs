//! Conversion result model.

use serde::{Deserialize, Serialize};

/// One rendered slide image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideImage {
    /// 1-based slide number.
    pub number: usize,

    /// Self-contained SVG document.
    pub svg: String,
}

/// The ordered output of a conversion job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversion {
    /// Slide images in ascending slide-number order.
    pub slides: Vec<SlideImage>,

    /// Total number of slides discovered in the package.
    pub slide_count: usize,
}

impl Conversion {
    /// Get a slide image by its 1-based number.
    pub fn slide(&self, number: usize) -> Option<&SlideImage> {
        self.slides.iter().find(|s| s.number == number)
    }

    /// Check that slide numbers are 1..=N in order.
    pub fn is_ordered(&self) -> bool {
        self.slides
            .iter()
            .enumerate()
            .all(|(i, s)| s.number == i + 1)
    }

    /// Serialize the result (numbers and SVG documents) to pretty JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::Error::Render(e.to_string()))
    }
}
