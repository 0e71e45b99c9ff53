//! Placeholder asset paths for image references.
//!
//! Images are not read or copied here. Assembly tools receive HTML pointing at
//! `images/<name>` and the raw references, and map one onto the other.

use std::path::Path;

/// Directory placeholder paths point into.
pub const IMAGE_DIR: &str = "images";

/// Reduce a file name to `[\w-]` characters plus a lowercase extension.
pub fn safe_filename(filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
    let safe_stem: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", safe_stem, ext.to_lowercase()),
        None => safe_stem,
    }
}

/// Placeholder path for an image reference: `images/<safe-name>`.
///
/// Only the final path component of the reference is kept.
pub fn asset_placeholder(reference: &str) -> String {
    let name = Path::new(reference.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(reference);
    format!("{}/{}", IMAGE_DIR, safe_filename(name))
}
