//! One-shot media asset extraction.

use std::collections::HashMap;

use crate::container::PptxContainer;
use crate::model::MediaAsset;

/// Addressable table of every embedded binary asset in the package.
///
/// Built exactly once per conversion job regardless of slide count and
/// shared read-only across all slides.
#[derive(Debug, Clone, Default)]
pub struct MediaTable {
    assets: HashMap<String, MediaAsset>,
}

impl MediaTable {
    /// Decode every `ppt/media/*` part into the table.
    ///
    /// Unreadable entries are skipped; legacy metafiles are kept but
    /// flagged non-renderable by [`MediaAsset::renderable`].
    pub fn extract(container: &PptxContainer) -> Self {
        let mut assets = HashMap::new();

        for part in container.list_parts_with_prefix("ppt/media/") {
            if let Ok(data) = container.read_binary(&part) {
                assets.insert(part.clone(), MediaAsset::new(part, data));
            }
        }

        Self { assets }
    }

    /// Look up an asset by its part path.
    pub fn get(&self, part_path: &str) -> Option<&MediaAsset> {
        self.assets.get(part_path)
    }

    /// Number of extracted assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over all assets.
    pub fn iter(&self) -> impl Iterator<Item = &MediaAsset> {
        self.assets.values()
    }
}
