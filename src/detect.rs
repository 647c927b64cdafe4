//! Input format gate for presentation conversion.
//!
//! The converter accepts exactly one container format (PPTX). Everything
//! else is rejected up front with a descriptive error and no partial
//! output; paginated-document formats like PDF are served by a different
//! renderer entirely and never enter this pipeline.

use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Supported presentation format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Office Open XML presentation (.pptx)
    Pptx,
}

impl SourceFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Pptx => "pptx",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Pptx => "PowerPoint Presentation",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Detect the input format from a file name and its bytes.
///
/// The file name decides whether the input belongs to this pipeline at
/// all; the bytes are then checked for a readable container. Known
/// non-presentation extensions get a specific rejection message.
///
/// # Example
///
/// ```no_run
/// use undeck::detect::detect_format;
///
/// let data = std::fs::read("deck.pptx")?;
/// let format = detect_format("deck.pptx", &data)?;
/// println!("Detected format: {}", format);
/// # Ok::<(), undeck::Error>(())
/// ```
pub fn detect_format(file_name: &str, data: &[u8]) -> Result<SourceFormat> {
    let ext = file_name
        .rsplit('.')
        .next()
        .filter(|e| e.len() < file_name.len())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pptx" => {
            if !is_zip_file(data) {
                return Err(Error::ArchiveUnreadable(
                    "input is not a ZIP container".to_string(),
                ));
            }
            Ok(SourceFormat::Pptx)
        }
        "ppt" => Err(Error::UnsupportedFormat(
            "legacy binary PowerPoint (.ppt) is not supported; re-save as .pptx".to_string(),
        )),
        "pdf" => Err(Error::UnsupportedFormat(
            "PDF documents are handled by the page renderer, not the presentation importer"
                .to_string(),
        )),
        "key" => Err(Error::UnsupportedFormat(
            "Keynote presentations (.key) are not supported".to_string(),
        )),
        "odp" => Err(Error::UnsupportedFormat(
            "OpenDocument presentations (.odp) are not supported".to_string(),
        )),
        "" => Err(Error::UnsupportedFormat(
            "file has no extension; expected .pptx".to_string(),
        )),
        other => Err(Error::UnsupportedFormat(format!(
            "unrecognized extension .{}; expected .pptx",
            other
        ))),
    }
}
