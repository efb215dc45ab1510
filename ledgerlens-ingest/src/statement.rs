//! Statement files handed to the extraction service.

use std::fs;
use std::path::Path;

use ledgerlens_core::{Error, Result};
use tracing::debug;

/// An uploaded statement: an image or a PDF, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    /// File name without directories, e.g. `july.pdf`
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl StatementFile {
    /// Read a statement from disk; rejects anything that is not an image or a PDF.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_for_name(&name)
            .ok_or_else(|| Error::UnsupportedFile(format!("{} (expected an image or PDF)", path.display())))?;

        let bytes = fs::read(path)?;
        debug!(name = %name, mime = mime_type, bytes = bytes.len(), "loaded statement");

        Ok(Self {
            name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let mime_type = mime_for_name(&name)
            .ok_or_else(|| Error::UnsupportedFile(format!("{name} (expected an image or PDF)")))?;
        Ok(Self {
            name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn base_name(&self) -> Option<&str> {
        base_name_of(&self.name)
    }
}

/// File name up to the first `.`; `None` when that is empty.
pub fn base_name_of(name: &str) -> Option<&str> {
    name.split('.').next().filter(|b| !b.is_empty())
}

/// `image/*` or `application/pdf`, chosen by extension.
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime)
}
