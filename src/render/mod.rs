//! Slide image rendering.
//!
//! One renderer: scalable vector graphics at the fixed output canvas.
//! Decoded geometry is already canvas-space, so rendering is pure
//! serialization plus the single-pass text layout approximation.

mod svg;

pub use svg::{escape_xml, fallback_svg, to_svg};
