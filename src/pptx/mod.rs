//! PPTX conversion pipeline.
//!
//! A [`PptxConverter`] owns one job: it reads the package once, builds
//! the shared read-only state (canvas scale, theme palette, media
//! table), then decodes and renders each slide. A malformed slide is
//! replaced by a placeholder image; it never aborts the batch.

pub mod media;
pub mod presentation;
pub mod slide;
pub mod theme;

use std::path::Path;

use crate::container::PptxContainer;
use crate::error::{Error, Result};
use crate::geometry::{CanvasSize, ScaleFactors};
use crate::model::{Conversion, SlideImage};
use crate::render;

pub use media::MediaTable;
pub use slide::SlideDecoder;
pub use theme::ThemePalette;

/// Converter for one PPTX package.
pub struct PptxConverter {
    container: PptxContainer,
    canvas: CanvasSize,
    scale: ScaleFactors,
    palette: ThemePalette,
    media: MediaTable,
    slide_parts: Vec<String>,
}

impl PptxConverter {
    /// Open a PPTX file for conversion.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = PptxContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a converter from raw package bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = PptxContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Build the job's shared state. Runs exactly once per job; every
    /// slide reads from it without mutation.
    fn from_container(container: PptxContainer) -> Result<Self> {
        let canvas = presentation::scan_canvas_size(&container);
        let scale = ScaleFactors::for_document(canvas);
        let palette = ThemePalette::resolve(&container);
        let media = MediaTable::extract(&container);
        let slide_parts = presentation::list_slide_parts(&container);

        Ok(Self {
            container,
            canvas,
            scale,
            palette,
            media,
            slide_parts,
        })
    }

    /// Number of slides discovered in the package.
    pub fn slide_count(&self) -> usize {
        self.slide_parts.len()
    }

    /// Declared document size in EMU.
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// The job's resolved theme palette.
    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    /// The job's extracted media table.
    pub fn media(&self) -> &MediaTable {
        &self.media
    }

    /// Convert every slide to an SVG image.
    ///
    /// Fails only before slide processing begins (no slide parts). Each
    /// slide that fails to decode or render yields the deterministic
    /// placeholder instead; partial success is the default contract.
    pub fn convert(&self) -> Result<Conversion> {
        if self.slide_parts.is_empty() {
            return Err(Error::NoSlides);
        }

        let mut slides = Vec::with_capacity(self.slide_parts.len());
        for (idx, part) in self.slide_parts.iter().enumerate() {
            let number = idx + 1;
            let svg = self
                .convert_slide(part, number)
                .unwrap_or_else(|_| render::fallback_svg(number));
            slides.push(SlideImage { number, svg });
        }

        Ok(Conversion {
            slide_count: slides.len(),
            slides,
        })
    }

    /// Decode and render one slide.
    fn convert_slide(&self, part: &str, number: usize) -> Result<String> {
        let rels = self.container.part_relationships(part);
        let xml = self.container.read_xml(part)?;

        let decoder = SlideDecoder::new(&self.palette, &self.scale, &rels, &self.media);
        let slide = decoder.decode(&xml).map_err(|e| Error::SlideDecode {
            number,
            message: e.to_string(),
        })?;

        Ok(render::to_svg(&slide, &self.media))
    }
}

impl std::fmt::Debug for PptxConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PptxConverter")
            .field("slides", &self.slide_parts.len())
            .field("canvas", &self.canvas)
            .field("media", &self.media.len())
            .finish()
    }
}
