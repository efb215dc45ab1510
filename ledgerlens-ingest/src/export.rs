//! Writing the extracted CSV back out.
//!
//! The file holds the model's raw text, not a re-serialization of parsed rows,
//! so rows the parser dropped are still present in the download.

use std::fs;
use std::path::Path;

use ledgerlens_core::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// How export files are named: `<prefix><base>.csv`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportNaming {
    pub prefix: String,
    /// Used when the upload has no usable base name
    pub fallback_name: String,
}

impl Default for ExportNaming {
    fn default() -> Self {
        Self {
            prefix: "transactions-".to_string(),
            fallback_name: "export".to_string(),
        }
    }
}

pub fn export_filename(base: Option<&str>, naming: &ExportNaming) -> String {
    let base = base
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .unwrap_or(&naming.fallback_name);
    format!("{}{}.csv", naming.prefix, base)
}

/// Write `raw` to `path` byte-for-byte.
pub fn export_csv(raw: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, raw.as_bytes())?;
    info!(path = %path.display(), bytes = raw.len(), "exported csv");
    Ok(())
}
