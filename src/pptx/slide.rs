//! Slide decoding: one slide's XML into an ordered element list.
//!
//! The decoder walks `p:spTree` in document order, which is preserved
//! as paint order, converting each node's transform through the job's
//! shared scale factors and resolving every color through the fixed
//! order: explicit literal, then theme slot, then context default.

use std::collections::HashMap;

use quick_xml::events::BytesStart;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::geometry::{emu_to_points, rot_to_degrees, Frame, ScaleFactors};
use crate::model::{
    DecodedSlide, Paragraph, PictureRef, ShapeBlock, TextAlignment, TextBlock, TextRun,
    VisualElement, DEFAULT_BACKGROUND,
};
use crate::pptx::media::MediaTable;
use crate::pptx::theme::ThemePalette;

/// Synthesized marker for auto-numbered list items; the numeric value
/// itself is not reproduced.
const AUTO_BULLET: &str = "\u{2022}";

/// Where a resolved color lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorTarget {
    Background,
    ShapeFill,
    ShapeStroke,
    Run,
}

/// In-flight state for the shape or picture node being walked.
#[derive(Debug, Default)]
struct NodeState {
    is_picture: bool,
    off: Option<(i64, i64)>,
    ext: Option<(i64, i64)>,
    rot: i64,
    fill: Option<String>,
    stroke: Option<String>,
    stroke_width_pt: Option<f64>,
    has_tx_body: bool,
    paragraphs: Vec<Paragraph>,
    embed: Option<String>,
}

/// In-flight state for the run being walked.
#[derive(Debug, Default)]
struct RunState {
    text: String,
    size_pt: Option<f64>,
    font: Option<String>,
    bold: bool,
    italic: bool,
    color: Option<String>,
}

impl RunState {
    fn into_run(self) -> TextRun {
        let defaults = TextRun::default();
        TextRun {
            text: self.text.nfc().collect(),
            size_pt: self.size_pt.unwrap_or(defaults.size_pt),
            font: self.font.unwrap_or(defaults.font),
            bold: self.bold,
            italic: self.italic,
            color: self.color.unwrap_or(defaults.color),
        }
    }
}

/// Decodes one slide against the job's shared read-only state.
pub struct SlideDecoder<'a> {
    palette: &'a ThemePalette,
    scale: &'a ScaleFactors,
    rels: &'a HashMap<String, String>,
    media: &'a MediaTable,
}

impl<'a> SlideDecoder<'a> {
    pub fn new(
        palette: &'a ThemePalette,
        scale: &'a ScaleFactors,
        rels: &'a HashMap<String, String>,
        media: &'a MediaTable,
    ) -> Self {
        Self {
            palette,
            scale,
            rels,
            media,
        }
    }

    /// Decode a slide's XML into a [`DecodedSlide`].
    pub fn decode(&self, xml: &str) -> Result<DecodedSlide> {
        let mut reader = quick_xml::Reader::from_str(xml);
        // Preserve whitespace from xml:space="preserve" elements
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();

        let mut background: Option<String> = None;
        let mut elements: Vec<VisualElement> = Vec::new();

        let mut in_bg = false;
        let mut in_sp_pr = false;
        let mut in_xfrm = false;
        let mut in_ln = false;
        let mut in_tx_body = false;
        let mut in_rpr = false;
        let mut in_bu_clr = false;
        let mut in_text = false;
        let mut color_target: Option<ColorTarget> = None;

        let mut node: Option<NodeState> = None;
        let mut paragraph: Option<Paragraph> = None;
        let mut run: Option<RunState> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => {
                    let local_name = e.name().local_name();
                    match local_name.as_ref() {
                        b"bg" => in_bg = true,
                        b"sp" | b"cxnSp" if node.is_none() => {
                            node = Some(NodeState::default());
                        }
                        b"pic" if node.is_none() => {
                            node = Some(NodeState {
                                is_picture: true,
                                ..Default::default()
                            });
                        }
                        b"spPr" if node.is_some() => in_sp_pr = true,
                        b"xfrm" if in_sp_pr => {
                            in_xfrm = true;
                            if let Some(ref mut st) = node {
                                st.rot = parse_i64_attr(e, b"rot").unwrap_or(0);
                            }
                        }
                        b"ln" if in_sp_pr => {
                            in_ln = true;
                            if let (Some(st), Some(w)) = (node.as_mut(), parse_i64_attr(e, b"w"))
                            {
                                st.stroke_width_pt = Some(emu_to_points(w.max(0) as u64));
                            }
                        }
                        b"txBody" if node.is_some() => {
                            in_tx_body = true;
                            if let Some(ref mut st) = node {
                                st.has_tx_body = true;
                            }
                        }
                        b"p" if in_tx_body => paragraph = Some(Paragraph::new()),
                        b"pPr" if paragraph.is_some() => {
                            parse_paragraph_props(e, paragraph.as_mut().unwrap());
                        }
                        b"buClr" => in_bu_clr = true,
                        b"r" | b"fld" if paragraph.is_some() => {
                            run = Some(RunState::default());
                        }
                        b"rPr" if run.is_some() => {
                            in_rpr = true;
                            parse_run_props(e, run.as_mut().unwrap());
                        }
                        b"t" if run.is_some() => in_text = true,
                        b"solidFill" => {
                            color_target = if in_bu_clr {
                                None
                            } else if in_rpr {
                                Some(ColorTarget::Run)
                            } else if in_ln {
                                Some(ColorTarget::ShapeStroke)
                            } else if in_sp_pr {
                                Some(ColorTarget::ShapeFill)
                            } else if in_bg {
                                Some(ColorTarget::Background)
                            } else {
                                None
                            };
                        }
                        b"srgbClr" | b"schemeClr" => {
                            if let Some(color) = self.resolve_color(e) {
                                apply_color(
                                    color,
                                    color_target,
                                    in_bg && !in_bu_clr,
                                    &mut background,
                                    node.as_mut(),
                                    run.as_mut(),
                                );
                            }
                        }
                        b"blip" => {
                            if let Some(ref mut st) = node {
                                if let Some(embed) = parse_str_attr(e, b"embed") {
                                    st.embed = Some(embed);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(quick_xml::events::Event::Empty(ref e)) => {
                    let local_name = e.name().local_name();
                    match local_name.as_ref() {
                        b"off" if in_xfrm => {
                            if let Some(ref mut st) = node {
                                st.off = Some((
                                    parse_i64_attr(e, b"x").unwrap_or(0),
                                    parse_i64_attr(e, b"y").unwrap_or(0),
                                ));
                            }
                        }
                        b"ext" if in_xfrm => {
                            if let Some(ref mut st) = node {
                                st.ext = Some((
                                    parse_i64_attr(e, b"cx").unwrap_or(0),
                                    parse_i64_attr(e, b"cy").unwrap_or(0),
                                ));
                            }
                        }
                        b"ln" if in_sp_pr => {
                            if let (Some(st), Some(w)) = (node.as_mut(), parse_i64_attr(e, b"w"))
                            {
                                st.stroke_width_pt = Some(emu_to_points(w.max(0) as u64));
                            }
                        }
                        b"pPr" if paragraph.is_some() => {
                            parse_paragraph_props(e, paragraph.as_mut().unwrap());
                        }
                        b"rPr" if run.is_some() => {
                            parse_run_props(e, run.as_mut().unwrap());
                        }
                        b"latin" if in_rpr => {
                            if let (Some(r), Some(face)) =
                                (run.as_mut(), parse_str_attr(e, b"typeface"))
                            {
                                r.font = Some(face);
                            }
                        }
                        b"buChar" => {
                            if let (Some(p), Some(glyph)) =
                                (paragraph.as_mut(), parse_str_attr(e, b"char"))
                            {
                                p.bullet = Some(glyph);
                            }
                        }
                        b"buAutoNum" => {
                            if let Some(ref mut p) = paragraph {
                                p.bullet = Some(AUTO_BULLET.to_string());
                            }
                        }
                        b"buNone" => {
                            if let Some(ref mut p) = paragraph {
                                p.bullet = None;
                            }
                        }
                        b"srgbClr" | b"schemeClr" => {
                            if let Some(color) = self.resolve_color(e) {
                                apply_color(
                                    color,
                                    color_target,
                                    in_bg && !in_bu_clr,
                                    &mut background,
                                    node.as_mut(),
                                    run.as_mut(),
                                );
                            }
                        }
                        b"blip" => {
                            if let Some(ref mut st) = node {
                                if let Some(embed) = parse_str_attr(e, b"embed") {
                                    st.embed = Some(embed);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    if in_text {
                        if let Some(ref mut r) = run {
                            let text = e.unescape().unwrap_or_default();
                            r.text.push_str(&text);
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => {
                    let local_name = e.name().local_name();
                    match local_name.as_ref() {
                        b"bg" => in_bg = false,
                        b"sp" | b"cxnSp" | b"pic" => {
                            if let Some(st) = node.take() {
                                if let Some(element) = self.finish_node(st) {
                                    elements.push(element);
                                }
                            }
                        }
                        b"spPr" => in_sp_pr = false,
                        b"xfrm" => in_xfrm = false,
                        b"ln" => in_ln = false,
                        b"txBody" => in_tx_body = false,
                        b"p" => {
                            if let (Some(st), Some(p)) = (node.as_mut(), paragraph.take()) {
                                st.paragraphs.push(p);
                            }
                        }
                        b"buClr" => in_bu_clr = false,
                        b"r" | b"fld" => {
                            if let (Some(p), Some(r)) = (paragraph.as_mut(), run.take()) {
                                if !r.text.is_empty() {
                                    p.runs.push(r.into_run());
                                }
                            }
                        }
                        b"rPr" => in_rpr = false,
                        b"t" => in_text = false,
                        b"solidFill" => color_target = None,
                        _ => {}
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        // Pictures paint before same-slide text and shapes so a
        // full-bleed image cannot obscure other content; everything
        // else keeps raw document order.
        let (pictures, rest): (Vec<_>, Vec<_>) =
            elements.into_iter().partition(VisualElement::is_picture);
        let mut elements = pictures;
        elements.extend(rest);

        Ok(DecodedSlide {
            background: background.unwrap_or_else(|| DEFAULT_BACKGROUND.to_string()),
            elements,
        })
    }

    /// Resolve a color element through the fixed order: an explicit
    /// `srgbClr` literal wins, a `schemeClr` goes through the palette,
    /// anything unresolved is left to the caller's context default.
    fn resolve_color(&self, e: &BytesStart<'_>) -> Option<String> {
        match e.name().local_name().as_ref() {
            b"srgbClr" => {
                let hex = parse_str_attr(e, b"val")?.to_uppercase();
                if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    Some(format!("#{}", hex))
                } else {
                    None
                }
            }
            b"schemeClr" => {
                let slot = parse_str_attr(e, b"val")?;
                self.palette.color(&slot).map(String::from)
            }
            _ => None,
        }
    }

    /// Turn a finished node into a visual element, or drop it.
    fn finish_node(&self, st: NodeState) -> Option<VisualElement> {
        let frame = match (st.off, st.ext) {
            (Some(off), Some(ext)) => Frame::from_emu(self.scale, off, ext, st.rot),
            // Placeholder without an explicit transform: keep the text
            // visible at the canvas origin rather than dropping it
            _ => Frame {
                rotation: rot_to_degrees(st.rot),
                ..Default::default()
            },
        };

        if st.is_picture {
            let part = self.rels.get(st.embed.as_deref()?)?;
            let asset = self.media.get(part)?;
            if !asset.renderable() {
                return None;
            }
            return Some(VisualElement::Picture(PictureRef {
                frame,
                resource: part.clone(),
            }));
        }

        if st.has_tx_body && st.paragraphs.iter().any(|p| !p.is_empty()) {
            return Some(VisualElement::Text(TextBlock {
                frame,
                paragraphs: st.paragraphs,
                fill: st.fill,
                stroke: st.stroke,
                stroke_width_pt: st.stroke_width_pt,
            }));
        }

        if st.fill.is_some() || st.stroke.is_some() {
            return Some(VisualElement::Shape(ShapeBlock {
                frame,
                fill: st.fill,
                stroke: st.stroke,
                stroke_width_pt: st.stroke_width_pt,
            }));
        }

        None
    }
}

/// Route a resolved color to whatever the walk is currently filling.
fn apply_color(
    color: String,
    target: Option<ColorTarget>,
    bg_fallback: bool,
    background: &mut Option<String>,
    node: Option<&mut NodeState>,
    run: Option<&mut RunState>,
) {
    match target {
        Some(ColorTarget::Run) => {
            if let Some(r) = run {
                r.color.get_or_insert(color);
            }
        }
        Some(ColorTarget::ShapeStroke) => {
            if let Some(st) = node {
                st.stroke.get_or_insert(color);
            }
        }
        Some(ColorTarget::ShapeFill) => {
            if let Some(st) = node {
                st.fill.get_or_insert(color);
            }
        }
        Some(ColorTarget::Background) => {
            background.get_or_insert(color);
        }
        // `p:bgRef` carries its scheme color outside any solidFill
        None if bg_fallback => {
            background.get_or_insert(color);
        }
        None => {}
    }
}

/// Parse `a:pPr` attributes into the open paragraph.
fn parse_paragraph_props(e: &BytesStart<'_>, paragraph: &mut Paragraph) {
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"algn" => {
                let val = String::from_utf8_lossy(&attr.value);
                paragraph.alignment = TextAlignment::from_algn(&val);
            }
            b"lvl" => {
                let val = String::from_utf8_lossy(&attr.value);
                paragraph.indent_level = val.parse().unwrap_or(0);
            }
            _ => {}
        }
    }
}

/// Parse `a:rPr` attributes into the open run.
fn parse_run_props(e: &BytesStart<'_>, run: &mut RunState) {
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"sz" => {
                let val = String::from_utf8_lossy(&attr.value);
                if let Ok(sz) = val.parse::<u32>() {
                    // Hundredths of a point
                    run.size_pt = Some(sz as f64 / 100.0);
                }
            }
            b"b" => {
                let val = String::from_utf8_lossy(&attr.value);
                run.bold = val != "0" && val != "false";
            }
            b"i" => {
                let val = String::from_utf8_lossy(&attr.value);
                run.italic = val != "0" && val != "false";
            }
            _ => {}
        }
    }
}

fn parse_str_attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn parse_i64_attr(e: &BytesStart<'_>, name: &[u8]) -> Option<i64> {
    parse_str_attr(e, name).and_then(|v| v.parse().ok())
}
