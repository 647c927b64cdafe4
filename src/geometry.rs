//! Geometry and unit conversion for slide coordinates.
//!
//! PPTX geometry is expressed in English Metric Units (914400 EMU per
//! inch). Every slide is scaled onto a fixed output canvas through one
//! pair of linear factors computed once per document, so elements keep
//! their relative placement regardless of the source aspect ratio.

use serde::{Deserialize, Serialize};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// English Metric Units per typographic point (1/72 inch).
pub const EMU_PER_POINT: f64 = 12_700.0;

/// Rotation attribute unit: 1/60000 of a degree.
pub const ROT_PER_DEGREE: f64 = 60_000.0;

/// Fixed output canvas width in logical pixels.
pub const CANVAS_WIDTH: f64 = 960.0;

/// Fixed output canvas height in logical pixels.
pub const CANVAS_HEIGHT: f64 = 720.0;

/// Default document width (EMU) when `p:sldSz` is missing: 10in, 4:3.
pub const DEFAULT_SLIDE_WIDTH_EMU: u64 = 9_144_000;

/// Default document height (EMU) when `p:sldSz` is missing: 7.5in, 4:3.
pub const DEFAULT_SLIDE_HEIGHT_EMU: u64 = 6_858_000;

/// Convert EMU to typographic points.
pub fn emu_to_points(emu: u64) -> f64 {
    emu as f64 / EMU_PER_POINT
}

/// Convert a `rot` attribute value (1/60000 deg) to degrees.
pub fn rot_to_degrees(rot: i64) -> f64 {
    rot as f64 / ROT_PER_DEGREE
}

/// Declared slide size of a document, in EMU.
///
/// Always positive: construction clamps malformed values back to the
/// built-in 4:3 default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width_emu: u64,
    pub height_emu: u64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width_emu: DEFAULT_SLIDE_WIDTH_EMU,
            height_emu: DEFAULT_SLIDE_HEIGHT_EMU,
        }
    }
}

impl CanvasSize {
    /// Create a canvas size, falling back to the default when either
    /// dimension is zero.
    pub fn new(width_emu: u64, height_emu: u64) -> Self {
        if width_emu == 0 || height_emu == 0 {
            return Self::default();
        }
        Self {
            width_emu,
            height_emu,
        }
    }
}

/// Linear factors mapping document EMU onto the output canvas.
///
/// Both factors come from the same declared document size; all geometry
/// within a job goes through this one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub sx: f64,
    pub sy: f64,
}

impl ScaleFactors {
    /// Compute the scale factors for a document size.
    pub fn for_document(size: CanvasSize) -> Self {
        Self {
            sx: CANVAS_WIDTH / size.width_emu as f64,
            sy: CANVAS_HEIGHT / size.height_emu as f64,
        }
    }

    /// Scale a horizontal EMU offset or extent to canvas pixels.
    pub fn x(&self, emu: i64) -> f64 {
        emu as f64 * self.sx
    }

    /// Scale a vertical EMU offset or extent to canvas pixels.
    pub fn y(&self, emu: i64) -> f64 {
        emu as f64 * self.sy
    }
}

/// Canvas-space placement of a visual element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Width in canvas pixels.
    pub width: f64,
    /// Height in canvas pixels.
    pub height: f64,
    /// Clockwise rotation about the frame center, in degrees.
    pub rotation: f64,
}

impl Frame {
    /// Build a canvas frame from document-unit offset, extent, and
    /// rotation.
    pub fn from_emu(scale: &ScaleFactors, off: (i64, i64), ext: (i64, i64), rot: i64) -> Self {
        Self {
            x: scale.x(off.0),
            y: scale.y(off.1),
            width: scale.x(ext.0),
            height: scale.y(ext.1),
            rotation: rot_to_degrees(rot),
        }
    }

    /// Horizontal center of the frame.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center of the frame.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}
