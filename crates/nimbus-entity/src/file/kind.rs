//! File kind classification.

use serde::{Deserialize, Serialize};

/// The two supported file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "file_kind", rename_all = "lowercase")]
pub enum FileKind {
    /// Any raster/vector image upload.
    Image,
    /// PDF document.
    Pdf,
}

impl FileKind {
    /// Classify an upload by its MIME type. Anything that is not an image
    /// is treated as a PDF, matching the upload endpoint's accept list.
    pub fn from_mime(mime: &str) -> Self {
        if mime.contains("image") {
            Self::Image
        } else {
            Self::Pdf
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}
