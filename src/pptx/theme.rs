//! Theme color scheme resolution.

use std::collections::HashMap;

use crate::container::PptxContainer;

/// The 12 scheme color slots with their built-in defaults (the stock
/// Office theme). Unparsed slots keep these values.
const SCHEME_SLOTS: [(&str, &str); 12] = [
    ("dk1", "#000000"),
    ("lt1", "#FFFFFF"),
    ("dk2", "#44546A"),
    ("lt2", "#E7E6E6"),
    ("accent1", "#4472C4"),
    ("accent2", "#ED7D31"),
    ("accent3", "#A5A5A5"),
    ("accent4", "#FFC000"),
    ("accent5", "#5B9BD5"),
    ("accent6", "#70AD47"),
    ("hlink", "#0563C1"),
    ("folHlink", "#954F72"),
];

/// A complete 12-slot scheme color palette.
///
/// Construction merges parsed overrides into the built-in defaults in
/// one step, so the palette is always complete and resolution never
/// fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    slots: HashMap<String, String>,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            slots: SCHEME_SLOTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl ThemePalette {
    /// Resolve the palette from the package's theme descriptor.
    ///
    /// The theme part is located through the presentation's
    /// relationships, falling back to the conventional
    /// `ppt/theme/theme1.xml`. A missing or malformed theme yields the
    /// built-in defaults; this never fails.
    pub fn resolve(container: &PptxContainer) -> Self {
        let rels = container.part_relationships("ppt/presentation.xml");
        // Pick the lexicographically first theme target so the choice
        // does not depend on map iteration order
        let mut theme_targets: Vec<&String> =
            rels.values().filter(|t| t.contains("theme")).collect();
        theme_targets.sort();
        let theme_path = theme_targets
            .first()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "ppt/theme/theme1.xml".to_string());

        let xml = match container.read_xml(&theme_path) {
            Ok(xml) => xml,
            Err(_) => return Self::default(),
        };

        let mut palette = Self::default();
        palette.slots.extend(parse_color_scheme(&xml));
        palette
    }

    /// Look up a scheme slot, resolving the `tx`/`bg` aliases used by
    /// slide-level references. `phClr` and unknown names yield `None`
    /// so the caller applies its context default.
    pub fn color(&self, slot: &str) -> Option<&str> {
        let slot = match slot {
            "tx1" => "dk1",
            "bg1" => "lt1",
            "tx2" => "dk2",
            "bg2" => "lt2",
            other => other,
        };
        self.slots.get(slot).map(String::as_str)
    }
}

/// Parse `a:clrScheme` into slot overrides.
///
/// `a:srgbClr@val` is an explicit literal; `a:sysClr@lastClr` is the
/// last-known literal of an indirect system color. A system color
/// without `lastClr` contributes nothing and keeps the default.
fn parse_color_scheme(xml: &str) -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_scheme = false;
    let mut current_slot: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e)) => {
                let local_name = e.name().local_name();
                match local_name.as_ref() {
                    b"clrScheme" => in_scheme = true,
                    b"srgbClr" | b"sysClr" => {
                        if let Some(ref slot) = current_slot {
                            record_color(e, slot, &mut overrides);
                        }
                    }
                    name if in_scheme && current_slot.is_none() => {
                        let name = String::from_utf8_lossy(name).to_string();
                        if SCHEME_SLOTS.iter().any(|(slot, _)| *slot == name) {
                            current_slot = Some(name);
                        }
                    }
                    _ => {}
                }
            }
            Ok(quick_xml::events::Event::Empty(ref e)) => {
                let local_name = e.name().local_name();
                if matches!(local_name.as_ref(), b"srgbClr" | b"sysClr") {
                    if let Some(ref slot) = current_slot {
                        record_color(e, slot, &mut overrides);
                    }
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => {
                let local_name = e.name().local_name();
                if local_name.as_ref() == b"clrScheme" {
                    break;
                }
                let name = String::from_utf8_lossy(local_name.as_ref()).to_string();
                if current_slot.as_deref() == Some(name.as_str()) {
                    current_slot = None;
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    overrides
}

/// Record a slot override from an `a:srgbClr@val` or `a:sysClr@lastClr`
/// attribute, ignoring malformed hex.
fn record_color(
    e: &quick_xml::events::BytesStart<'_>,
    slot: &str,
    overrides: &mut HashMap<String, String>,
) {
    let wanted_attr: &[u8] = if e.name().local_name().as_ref() == b"srgbClr" {
        b"val"
    } else {
        b"lastClr"
    };
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == wanted_attr {
            let hex = String::from_utf8_lossy(&attr.value).to_uppercase();
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                overrides.insert(slot.to_string(), format!("#{}", hex));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Test">
  <a:themeElements>
    <a:clrScheme name="Test">
      <a:dk1><a:sysClr val="windowText" lastClr="111111"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FEFEFE"/></a:lt1>
      <a:dk2><a:srgbClr val="1F2A44"/></a:dk2>
      <a:lt2><a:srgbClr val="EEECE1"/></a:lt2>
      <a:accent1><a:srgbClr val="C0504D"/></a:accent1>
      <a:accent2><a:srgbClr val="9BBB59"/></a:accent2>
      <a:accent3><a:sysClr val="window"/></a:accent3>
      <a:hlink><a:srgbClr val="0000FF"/></a:hlink>
    </a:clrScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_default_palette_complete() {
        let palette = ThemePalette::default();
        for (slot, hex) in SCHEME_SLOTS {
            assert_eq!(palette.color(slot), Some(hex));
        }
    }

    #[test]
    fn test_parse_overrides() {
        let overrides = parse_color_scheme(THEME_XML);
        assert_eq!(overrides.get("dk2").map(String::as_str), Some("#1F2A44"));
        assert_eq!(overrides.get("accent1").map(String::as_str), Some("#C0504D"));
        // sysClr contributes its last-known literal
        assert_eq!(overrides.get("dk1").map(String::as_str), Some("#111111"));
        // sysClr without lastClr contributes nothing
        assert!(!overrides.contains_key("accent3"));
    }

    #[test]
    fn test_merged_palette() {
        let mut palette = ThemePalette::default();
        palette.slots.extend(parse_color_scheme(THEME_XML));

        // Parsed slots override the defaults
        assert_eq!(palette.color("accent1"), Some("#C0504D"));
        assert_eq!(palette.color("hlink"), Some("#0000FF"));
        // Unparsed slots keep the built-in defaults
        assert_eq!(palette.color("accent3"), Some("#A5A5A5"));
        assert_eq!(palette.color("accent6"), Some("#70AD47"));
    }

    #[test]
    fn test_scheme_aliases() {
        let palette = ThemePalette::default();
        assert_eq!(palette.color("tx1"), palette.color("dk1"));
        assert_eq!(palette.color("bg1"), palette.color("lt1"));
        assert_eq!(palette.color("tx2"), palette.color("dk2"));
        assert_eq!(palette.color("bg2"), palette.color("lt2"));
        // Placeholder color resolves to the context default downstream
        assert_eq!(palette.color("phClr"), None);
    }

    #[test]
    fn test_malformed_scheme_keeps_defaults() {
        let overrides = parse_color_scheme("<a:clrScheme><a:dk1><a:srgbClr val=\"nothex\"/></a:dk1>");
        assert!(overrides.is_empty());
    }
}
