//! Intermediate model for decoded slides.
//!
//! The slide decoder converts PPTX XML into these structures, and the
//! SVG renderer consumes them. A [`DecodedSlide`] lives only for one
//! slide's decode-then-render step; [`Conversion`] is the durable
//! output handed back to the caller.

mod conversion;
mod media;
mod paragraph;
mod slide;

pub use conversion::*;
pub use media::*;
pub use paragraph::*;
pub use slide::*;
