//! # undeck
//!
//! High-performance PowerPoint (PPTX) to SVG slide conversion.
//!
//! This library decodes a PPTX package and renders each slide as a
//! self-contained SVG image on a fixed 960x720 canvas. One malformed
//! slide never fails the batch: it is replaced by a deterministic
//! placeholder image and conversion continues.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undeck::convert_file;
//!
//! let conversion = convert_file("slides.pptx")?;
//! println!("Slides: {}", conversion.slide_count);
//! for slide in &conversion.slides {
//!     std::fs::write(format!("slide-{:03}.svg", slide.number), &slide.svg)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## From bytes
//!
//! The caller supplies raw bytes and the file name; the extension gate
//! rejects anything that is not a PPTX package before parsing.
//!
//! ```no_run
//! use undeck::convert_bytes;
//!
//! let data = std::fs::read("slides.pptx")?;
//! let conversion = convert_bytes(&data, "slides.pptx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod container;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod model;
pub mod pptx;
pub mod render;

// Re-exports
pub use container::PptxContainer;
pub use detect::{detect_format, SourceFormat};
pub use error::{Error, Result};
pub use geometry::{CanvasSize, Frame, ScaleFactors, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use model::{
    Conversion, DecodedSlide, MediaAsset, Paragraph, PictureRef, ShapeBlock, SlideImage,
    TextAlignment, TextBlock, TextRun, VisualElement,
};
pub use pptx::{MediaTable, PptxConverter, ThemePalette};

use std::path::Path;

/// Convert a presentation file to a list of SVG slide images.
///
/// # Example
///
/// ```no_run
/// use undeck::convert_file;
///
/// let conversion = convert_file("slides.pptx")?;
/// assert_eq!(conversion.slides.len(), conversion.slide_count);
/// # Ok::<(), undeck::Error>(())
/// ```
pub fn convert_file(path: impl AsRef<Path>) -> Result<Conversion> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    convert_bytes(&data, &file_name)
}

/// Convert presentation bytes to a list of SVG slide images.
///
/// The file name decides whether the input belongs to this pipeline;
/// non-PPTX inputs are rejected with [`Error::UnsupportedFormat`] and
/// no partial output.
pub fn convert_bytes(data: &[u8], file_name: &str) -> Result<Conversion> {
    detect_format(file_name, data)?;
    let converter = PptxConverter::from_bytes(data.to_vec())?;
    converter.convert()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_bytes_rejects_wrong_extension() {
        let result = convert_bytes(b"%PDF-1.7", "report.pdf");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_convert_bytes_rejects_garbage_archive() {
        let result = convert_bytes(b"garbage", "deck.pptx");
        assert!(matches!(result, Err(Error::ArchiveUnreadable(_))));
    }

    #[test]
    fn test_convert_missing_file() {
        let result = convert_file("does-not-exist.pptx");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
