//! SVG renderer implementation.
//!
//! Text layout is an intentional approximation: one line per paragraph,
//! no wrapping, and horizontal advance estimated from display width
//! rather than glyph metrics. Overlong runs overflow their box. This
//! keeps output deterministic and visually convincing without a text
//! shaping engine; "approximate, never exact" is the contract.

use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use unicode_width::UnicodeWidthStr;

use crate::geometry::{Frame, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::model::{
    DecodedSlide, Paragraph, PictureRef, ShapeBlock, TextAlignment, TextBlock, TextRun,
    VisualElement, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PT,
};
use crate::pptx::media::MediaTable;

/// Inner padding between a text box edge and its content.
const TEXT_PADDING: f64 = 4.0;

/// Line advance as a multiple of the paragraph's tallest run size.
const LINE_LEADING: f64 = 1.2;

/// Empirical average glyph width as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Horizontal shift per indent level.
const INDENT_STEP: f64 = 24.0;

/// Default outline width in points when a stroke has no declared width.
const DEFAULT_STROKE_WIDTH_PT: f64 = 1.0;

/// Serialize a decoded slide to a self-contained SVG document.
pub fn to_svg(slide: &DecodedSlide, media: &MediaTable) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = CANVAS_WIDTH,
        h = CANVAS_HEIGHT,
    );
    out.push('\n');

    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        escape_xml(&slide.background),
    );

    for element in &slide.elements {
        match element {
            VisualElement::Text(block) => render_text_block(&mut out, block),
            VisualElement::Shape(shape) => render_shape(&mut out, shape),
            VisualElement::Picture(picture) => render_picture(&mut out, picture, media),
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Deterministic placeholder for a slide that failed to decode.
pub fn fallback_svg(slide_number: usize) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = CANVAS_WIDTH,
        h = CANVAS_HEIGHT,
    );
    out.push('\n');
    let _ = writeln!(
        out,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#F2F2F2"/>"##,
        CANVAS_WIDTH, CANVAS_HEIGHT,
    );
    let _ = writeln!(
        out,
        r##"<text x="{x}" y="{y:.2}" text-anchor="middle" font-family="{font}" font-size="28" fill="#555555">Slide {n}</text>"##,
        x = CANVAS_WIDTH / 2.0,
        y = CANVAS_HEIGHT / 2.0 - 10.0,
        font = DEFAULT_FONT_FAMILY,
        n = slide_number,
    );
    let _ = writeln!(
        out,
        r##"<text x="{x}" y="{y:.2}" text-anchor="middle" font-family="{font}" font-size="16" fill="#888888">content unavailable</text>"##,
        x = CANVAS_WIDTH / 2.0,
        y = CANVAS_HEIGHT / 2.0 + 22.0,
        font = DEFAULT_FONT_FAMILY,
    );
    out.push_str("</svg>\n");
    out
}

/// Escape literal text for safe embedding in markup.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Estimated horizontal advance of a run of text.
fn estimate_advance(text: &str, size_pt: f64) -> f64 {
    UnicodeWidthStr::width(text) as f64 * size_pt * CHAR_WIDTH_FACTOR
}

fn rotate_transform(frame: &Frame) -> String {
    if frame.rotation == 0.0 {
        String::new()
    } else {
        format!(
            r#" transform="rotate({:.2} {:.2} {:.2})""#,
            frame.rotation,
            frame.center_x(),
            frame.center_y(),
        )
    }
}

fn render_shape(out: &mut String, shape: &ShapeBlock) {
    let _ = write!(
        out,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}""#,
        shape.frame.x,
        shape.frame.y,
        shape.frame.width,
        shape.frame.height,
        shape
            .fill
            .as_deref()
            .map(escape_xml)
            .unwrap_or_else(|| "none".to_string()),
    );
    if let Some(ref stroke) = shape.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{:.2}""#,
            escape_xml(stroke),
            shape.stroke_width_pt.unwrap_or(DEFAULT_STROKE_WIDTH_PT),
        );
    }
    let _ = writeln!(out, "{}/>", rotate_transform(&shape.frame));
}

fn render_picture(out: &mut String, picture: &PictureRef, media: &MediaTable) {
    let Some(asset) = media.get(&picture.resource) else {
        return;
    };
    let Some(ref mime) = asset.mime else {
        return;
    };
    let _ = writeln!(
        out,
        r#"<image x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" preserveAspectRatio="none"{} href="data:{};base64,{}"/>"#,
        picture.frame.x,
        picture.frame.y,
        picture.frame.width,
        picture.frame.height,
        rotate_transform(&picture.frame),
        mime,
        BASE64.encode(&asset.data),
    );
}

fn render_text_block(out: &mut String, block: &TextBlock) {
    if block.fill.is_some() || block.stroke.is_some() {
        render_shape(
            out,
            &ShapeBlock {
                frame: block.frame,
                fill: block.fill.clone(),
                stroke: block.stroke.clone(),
                stroke_width_pt: block.stroke_width_pt,
            },
        );
    }

    let rotated = block.frame.rotation != 0.0;
    if rotated {
        let _ = writeln!(out, "<g{}>", rotate_transform(&block.frame));
    }

    // Explicit cursor fold: one line per paragraph, no wrapping
    let mut cursor_y = block.frame.y + TEXT_PADDING;
    for paragraph in &block.paragraphs {
        let line_size = paragraph.line_size_pt();
        let baseline = cursor_y + line_size;
        if !paragraph.is_empty() {
            render_paragraph(out, paragraph, &block.frame, baseline);
        }
        cursor_y += line_size * LINE_LEADING;
    }

    if rotated {
        out.push_str("</g>\n");
    }
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph, frame: &Frame, baseline: f64) {
    match paragraph.alignment {
        TextAlignment::Start | TextAlignment::Justify => {
            let mut x =
                frame.x + TEXT_PADDING + paragraph.indent_level as f64 * INDENT_STEP;

            if let Some(ref glyph) = paragraph.bullet {
                let size = paragraph
                    .runs
                    .first()
                    .map(|r| r.size_pt)
                    .unwrap_or(DEFAULT_FONT_SIZE_PT);
                let marker = TextRun {
                    text: glyph.clone(),
                    size_pt: size,
                    ..Default::default()
                };
                render_run(out, &marker, x, baseline, None);
                x += estimate_advance(glyph, size) + size * CHAR_WIDTH_FACTOR;
            }

            for run in &paragraph.runs {
                render_run(out, run, x, baseline, None);
                x += estimate_advance(&run.text, run.size_pt);
            }
        }
        TextAlignment::Center => {
            render_anchored(out, paragraph, frame.center_x(), baseline, "middle");
        }
        TextAlignment::End => {
            render_anchored(
                out,
                paragraph,
                frame.x + frame.width - TEXT_PADDING,
                baseline,
                "end",
            );
        }
    }
}

/// Emit one run as its own positioned text element.
fn render_run(out: &mut String, run: &TextRun, x: f64, baseline: f64, anchor: Option<&str>) {
    let _ = write!(out, r#"<text x="{:.2}" y="{:.2}""#, x, baseline);
    if let Some(anchor) = anchor {
        let _ = write!(out, r#" text-anchor="{}""#, anchor);
    }
    let _ = writeln!(out, "{}>{}</text>", style_attrs(run), escape_xml(&run.text));
}

/// Emit a whole paragraph as one anchored text element with a span per
/// run, letting the anchor do the horizontal placement.
fn render_anchored(
    out: &mut String,
    paragraph: &Paragraph,
    x: f64,
    baseline: f64,
    anchor: &str,
) {
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="{}">"#,
        x, baseline, anchor
    );
    if let Some(ref glyph) = paragraph.bullet {
        let size = paragraph
            .runs
            .first()
            .map(|r| r.size_pt)
            .unwrap_or(DEFAULT_FONT_SIZE_PT);
        let marker = TextRun {
            text: format!("{} ", glyph),
            size_pt: size,
            ..Default::default()
        };
        let _ = write!(
            out,
            "<tspan{}>{}</tspan>",
            style_attrs(&marker),
            escape_xml(&marker.text)
        );
    }
    for run in &paragraph.runs {
        let _ = write!(
            out,
            "<tspan{}>{}</tspan>",
            style_attrs(run),
            escape_xml(&run.text)
        );
    }
    out.push_str("</text>\n");
}

fn style_attrs(run: &TextRun) -> String {
    let mut attrs = format!(
        r#" font-family="{}" font-size="{:.2}" fill="{}""#,
        escape_xml(&run.font),
        run.size_pt,
        escape_xml(&run.color),
    );
    if run.bold {
        attrs.push_str(r#" font-weight="bold""#);
    }
    if run.italic {
        attrs.push_str(r#" font-style="italic""#);
    }
    attrs
}
