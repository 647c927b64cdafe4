//! End-to-end conversion tests over synthetic PPTX packages.
//!
//! Packages are assembled in memory so the suite needs no binary
//! fixtures and every property is pinned to known input.

use std::io::{Cursor, Write};

use undeck::{convert_bytes, Error};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SLIDE_NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

/// Builder for synthetic PPTX archives.
struct DeckBuilder {
    size: Option<(u64, u64)>,
    theme: Option<String>,
    slides: Vec<String>,
    extra_parts: Vec<(String, Vec<u8>)>,
}

impl DeckBuilder {
    fn new() -> Self {
        Self {
            size: Some((9_144_000, 6_858_000)),
            theme: None,
            slides: Vec::new(),
            extra_parts: Vec::new(),
        }
    }

    fn size(mut self, cx: u64, cy: u64) -> Self {
        self.size = Some((cx, cy));
        self
    }

    fn theme(mut self, xml: impl Into<String>) -> Self {
        self.theme = Some(xml.into());
        self
    }

    fn slide(mut self, body: impl Into<String>) -> Self {
        self.slides.push(body.into());
        self
    }

    fn part(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.extra_parts.push((path.into(), data.into()));
        self
    }

    fn build(self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        if let Some((cx, cy)) = self.size {
            zip.start_file("ppt/presentation.xml", options).unwrap();
            write!(
                zip,
                r#"<p:presentation {SLIDE_NS}><p:sldSz cx="{cx}" cy="{cy}"/></p:presentation>"#
            )
            .unwrap();
        }

        if let Some(theme) = self.theme {
            zip.start_file("ppt/theme/theme1.xml", options).unwrap();
            zip.write_all(theme.as_bytes()).unwrap();
        }

        for (i, slide) in self.slides.iter().enumerate() {
            zip.start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
                .unwrap();
            zip.write_all(slide.as_bytes()).unwrap();
        }

        for (path, data) in self.extra_parts {
            zip.start_file(path, options).unwrap();
            zip.write_all(&data).unwrap();
        }

        zip.finish().unwrap();
        buffer
    }
}

fn empty_slide() -> String {
    format!(r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree/></p:cSld></p:sld>"#)
}

fn text_slide(text: &str) -> String {
    format!(
        r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree>
  <p:sp>
    <p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="3048000" cy="914400"/></a:xfrm></p:spPr>
    <p:txBody><a:bodyPr/><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody>
  </p:sp>
</p:spTree></p:cSld></p:sld>"#
    )
}

#[test]
fn sequential_slides_convert_in_order() {
    let data = DeckBuilder::new()
        .slide(text_slide("one"))
        .slide(text_slide("two"))
        .slide(text_slide("three"))
        .slide(text_slide("four"))
        .build();

    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    assert_eq!(conversion.slide_count, 4);
    assert_eq!(conversion.slides.len(), 4);
    for (i, slide) in conversion.slides.iter().enumerate() {
        assert_eq!(slide.number, i + 1);
        assert!(slide.svg.starts_with("<svg"));
    }
    assert!(conversion.slides[0].svg.contains("one"));
    assert!(conversion.slides[3].svg.contains("four"));
}

#[test]
fn full_extent_element_fills_canvas_for_any_aspect() {
    // 16:9 document: a full-extent shape still maps to the whole
    // fixed canvas because each axis scales independently
    let slide = format!(
        r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree>
  <p:sp>
    <p:spPr>
      <a:xfrm><a:off x="0" y="0"/><a:ext cx="12192000" cy="6858000"/></a:xfrm>
      <a:solidFill><a:srgbClr val="336699"/></a:solidFill>
    </p:spPr>
  </p:sp>
</p:spTree></p:cSld></p:sld>"#
    );
    let data = DeckBuilder::new()
        .size(12_192_000, 6_858_000)
        .slide(slide)
        .build();

    let conversion = convert_bytes(&data, "wide.pptx").unwrap();
    let svg = &conversion.slides[0].svg;
    assert!(svg.contains(r#"<rect x="0.00" y="0.00" width="960.00" height="720.00""#));
}

#[test]
fn explicit_literal_beats_theme_slot() {
    // accent1 is remapped in the theme, but the run declares a literal
    let theme = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:themeElements><a:clrScheme name="t">
  <a:accent1><a:srgbClr val="112233"/></a:accent1>
</a:clrScheme></a:themeElements></a:theme>"#;
    let slide = format!(
        r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree>
  <p:sp>
    <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm></p:spPr>
    <p:txBody><a:bodyPr/><a:p><a:r>
      <a:rPr><a:solidFill><a:srgbClr val="445566"/></a:solidFill></a:rPr>
      <a:t>literal</a:t>
    </a:r></a:p></p:txBody>
  </p:sp>
</p:spTree></p:cSld></p:sld>"#
    );
    let data = DeckBuilder::new().theme(theme).slide(slide).build();

    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    let svg = &conversion.slides[0].svg;
    assert!(svg.contains(r##"fill="#445566""##));
    assert!(!svg.contains(r##"fill="#112233""##));
}

#[test]
fn missing_theme_yields_builtin_defaults() {
    // No theme part at all: scheme references resolve to the defaults
    let slide = format!(
        r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree>
  <p:sp>
    <p:spPr>
      <a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm>
      <a:solidFill><a:schemeClr val="accent1"/></a:solidFill>
    </p:spPr>
  </p:sp>
</p:spTree></p:cSld></p:sld>"#
    );
    let data = DeckBuilder::new().slide(slide).build();

    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    // Built-in accent1 default
    assert!(conversion.slides[0].svg.contains(r##"fill="#4472C4""##));
}

#[test]
fn malformed_slide_yields_placeholder_batch_continues() {
    let data = DeckBuilder::new()
        .slide(text_slide("first"))
        .slide("<p:sld><p:cSld></p:mismatch></p:sld>")
        .slide(text_slide("third"))
        .build();

    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    assert_eq!(conversion.slide_count, 3);

    assert!(conversion.slides[0].svg.contains("first"));
    assert!(!conversion.slides[0].svg.contains("content unavailable"));

    let placeholder = &conversion.slides[1].svg;
    assert!(placeholder.contains("Slide 2"));
    assert!(placeholder.contains("content unavailable"));

    assert!(conversion.slides[2].svg.contains("third"));
    assert!(!conversion.slides[2].svg.contains("content unavailable"));
}

#[test]
fn identical_input_converts_identically() {
    let data = DeckBuilder::new()
        .slide(text_slide("same"))
        .slide(empty_slide())
        .build();

    let first = convert_bytes(&data, "deck.pptx").unwrap();
    let second = convert_bytes(&data, "deck.pptx").unwrap();

    assert_eq!(first.slide_count, second.slide_count);
    for (a, b) in first.slides.iter().zip(second.slides.iter()) {
        assert_eq!(a.number, b.number);
        assert_eq!(a.svg, b.svg);
    }
}

#[test]
fn widescreen_hello_example() {
    // The worked example: 16:9 document, one centered bold 24pt run
    let slide = format!(
        r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree>
  <p:sp>
    <p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="3048000" cy="914400"/></a:xfrm></p:spPr>
    <p:txBody>
      <a:bodyPr/>
      <a:p>
        <a:pPr algn="ctr"/>
        <a:r><a:rPr sz="2400" b="1"/><a:t>Hello</a:t></a:r>
      </a:p>
    </p:txBody>
  </p:sp>
</p:spTree></p:cSld></p:sld>"#
    );
    let data = DeckBuilder::new()
        .size(12_192_000, 6_858_000)
        .slide(slide)
        .build();

    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    let svg = &conversion.slides[0].svg;

    // Block at (72, 48), 240x96; centered text anchors at x = 72 + 120
    // with the first baseline at 48 + 4 + 24
    assert!(svg.contains(r#"<text x="192.00" y="76.00" text-anchor="middle">"#));
    assert!(svg.contains(r#"font-size="24.00""#));
    assert!(svg.contains(r#"font-weight="bold""#));
    assert!(svg.contains(r##"fill="#000000""##));
    assert!(svg.contains(">Hello</tspan>"));
}

#[test]
fn pictures_paint_before_text_and_shapes() {
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
</Relationships>"#;
    // Full-bleed picture declared after the text: promoted to paint first
    let slide = format!(
        r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree>
  <p:sp>
    <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm></p:spPr>
    <p:txBody><a:bodyPr/><a:p><a:r><a:t>on top</a:t></a:r></a:p></p:txBody>
  </p:sp>
  <p:pic>
    <p:blipFill><a:blip r:embed="rId5"/></p:blipFill>
    <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="9144000" cy="6858000"/></a:xfrm></p:spPr>
  </p:pic>
</p:spTree></p:cSld></p:sld>"#
    );
    let data = DeckBuilder::new()
        .slide(slide)
        .part("ppt/slides/_rels/slide1.xml.rels", rels.as_bytes())
        .part("ppt/media/image1.png", b"pngdata".as_slice())
        .build();

    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    let svg = &conversion.slides[0].svg;

    let image_pos = svg.find("<image").expect("picture should render");
    let text_pos = svg.find("on top").expect("text should render");
    assert!(image_pos < text_pos, "picture must paint before text");
    assert!(svg.contains("data:image/png;base64,"));
}

#[test]
fn metafile_picture_is_skipped() {
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/clip1.wmf"/>
</Relationships>"#;
    let slide = format!(
        r#"<p:sld {SLIDE_NS}><p:cSld><p:spTree>
  <p:pic>
    <p:blipFill><a:blip r:embed="rId5"/></p:blipFill>
    <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm></p:spPr>
  </p:pic>
</p:spTree></p:cSld></p:sld>"#
    );
    let data = DeckBuilder::new()
        .slide(slide)
        .part("ppt/slides/_rels/slide1.xml.rels", rels.as_bytes())
        .part("ppt/media/clip1.wmf", b"wmfdata".as_slice())
        .build();

    // Non-renderable asset: the reference is dropped, never fatal
    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    assert!(!conversion.slides[0].svg.contains("<image"));
}

#[test]
fn missing_presentation_part_uses_default_canvas() {
    let mut builder = DeckBuilder::new().slide(text_slide("no descriptor"));
    builder.size = None;
    let data = builder.build();

    // Canvas metadata is best-effort; the job still converts
    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    assert_eq!(conversion.slide_count, 1);
    // Default 4:3 document: the box lands at 96px, text 4px inside it
    assert!(conversion.slides[0].svg.contains(r#"x="100.00""#));
}

#[test]
fn empty_package_is_no_slides() {
    let data = DeckBuilder::new().build();
    let result = convert_bytes(&data, "deck.pptx");
    assert!(matches!(result, Err(Error::NoSlides)));
}

#[test]
fn wrong_extension_rejected_before_parsing() {
    let data = DeckBuilder::new().slide(empty_slide()).build();
    let result = convert_bytes(&data, "deck.odp");
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn garbage_bytes_are_archive_unreadable() {
    let result = convert_bytes(b"PK\x03\x04 but then garbage", "deck.pptx");
    assert!(matches!(result, Err(Error::ArchiveUnreadable(_))));
}

#[test]
fn background_color_round_trip() {
    let slide = format!(
        r#"<p:sld {SLIDE_NS}><p:cSld>
  <p:bg><p:bgPr><a:solidFill><a:srgbClr val="0B1E3A"/></a:solidFill></p:bgPr></p:bg>
  <p:spTree/>
</p:cSld></p:sld>"#
    );
    let data = DeckBuilder::new().slide(slide).build();
    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    assert!(conversion.slides[0].svg.contains(r##"fill="#0B1E3A""##));
}

#[test]
fn convert_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pptx");
    std::fs::write(&path, DeckBuilder::new().slide(text_slide("from disk")).build()).unwrap();

    let conversion = undeck::convert_file(&path).unwrap();
    assert_eq!(conversion.slide_count, 1);
    assert!(conversion.slides[0].svg.contains("from disk"));
}

#[test]
fn slide_numbering_stops_at_gap() {
    // slide1 and slide3 exist; only slide1 is discovered
    let data = DeckBuilder::new()
        .slide(text_slide("only"))
        .part("ppt/slides/slide3.xml", empty_slide().into_bytes())
        .build();

    let conversion = convert_bytes(&data, "deck.pptx").unwrap();
    assert_eq!(conversion.slide_count, 1);
}
