//! Root presentation descriptor scanning.

use crate::container::PptxContainer;
use crate::geometry::CanvasSize;

/// Read the declared slide size from `ppt/presentation.xml`.
///
/// Best-effort: a missing part, malformed XML, or unparsable attributes
/// silently yield the built-in 4:3 default. A usable fallback is worth
/// more than failing the whole job over geometry metadata.
pub fn scan_canvas_size(container: &PptxContainer) -> CanvasSize {
    let xml = match container.read_xml("ppt/presentation.xml") {
        Ok(xml) => xml,
        Err(_) => return CanvasSize::default(),
    };

    let mut reader = quick_xml::Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e)) => {
                if e.name().local_name().as_ref() == b"sldSz" {
                    let mut cx = 0u64;
                    let mut cy = 0u64;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"cx" => {
                                cx = String::from_utf8_lossy(&attr.value)
                                    .parse()
                                    .unwrap_or(0);
                            }
                            b"cy" => {
                                cy = String::from_utf8_lossy(&attr.value)
                                    .parse()
                                    .unwrap_or(0);
                            }
                            _ => {}
                        }
                    }
                    return CanvasSize::new(cx, cy);
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    CanvasSize::default()
}

/// List slide parts in presentation order.
///
/// Slides are probed as `ppt/slides/slideN.xml` for N = 1, 2, …,
/// stopping at the first missing sequence number. No alternate-name
/// discovery is attempted.
pub fn list_slide_parts(container: &PptxContainer) -> Vec<String> {
    let mut parts = Vec::new();
    for number in 1.. {
        let path = format!("ppt/slides/slide{}.xml", number);
        if !container.exists(&path) {
            break;
        }
        parts.push(path);
    }
    parts
}
