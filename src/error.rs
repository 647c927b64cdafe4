//! Error types for the undeck library.

use std::io;
use thiserror::Error;

/// Result type alias for undeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during presentation conversion.
///
/// Only `Io`, `UnsupportedFormat`, `ArchiveUnreadable`, and `NoSlides`
/// can reach callers of the conversion pipeline; decode and render
/// failures are recovered per slide with a placeholder image.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a supported presentation format.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// The input bytes are not a readable ZIP container.
    #[error("Archive unreadable: {0}")]
    ArchiveUnreadable(String),

    /// The package contains no slide parts.
    #[error("No slides found in presentation")]
    NoSlides,

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required package part is missing.
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// A single slide failed to decode.
    #[error("Slide {number} failed to decode: {message}")]
    SlideDecode { number: usize, message: String },

    /// Error while serializing a slide image.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ArchiveUnreadable(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
