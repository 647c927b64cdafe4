//! Embedded media asset model.

use serde::{Deserialize, Serialize};

/// A binary asset extracted from the package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Part path inside the container (e.g. `ppt/media/image1.png`).
    pub part_path: String,

    /// Content type inferred from the file extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,

    /// Raw bytes.
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl MediaAsset {
    /// Create an asset, inferring the content type from the part path.
    pub fn new(part_path: impl Into<String>, data: Vec<u8>) -> Self {
        let part_path = part_path.into();
        let mime = mime_from_path(&part_path);
        Self {
            part_path,
            mime,
            data,
        }
    }

    /// Whether this asset can be embedded in SVG output.
    ///
    /// Legacy vector metafiles (WMF/EMF) are recorded in the table but
    /// cannot be rendered, so the decoder skips references to them.
    pub fn renderable(&self) -> bool {
        match self.mime.as_deref() {
            Some("image/x-wmf") | Some("image/x-emf") => false,
            Some(mime) => mime.starts_with("image/"),
            None => false,
        }
    }
}

/// Infer a MIME type from a part path's extension.
pub fn mime_from_path(path: &str) -> Option<String> {
    let ext = path.rsplit('.').next()?.to_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "wmf" => "image/x-wmf",
        "emf" => "image/x-emf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "wmv" => "video/x-ms-wmv",
        _ => return None,
    };
    Some(mime.to_string())
}
