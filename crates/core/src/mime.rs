//! File extension to MIME type mapping and the upload allow-list.
//!
//! Pure lookups over a static table; no failure modes. The table doubles as
//! the allow-list: anything missing from it is rejected by validation even
//! though `mime_type` still returns the generic binary type for it.

use std::path::Path;

/// MIME type used for extensions outside the table.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Supported extensions (lowercase, without the dot) and their MIME types.
const MIME_TABLE: &[(&str, &str)] = &[
    // Images
    ("gif", "image/gif"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    // Video
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    // Documents
    ("pdf", "application/pdf"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("txt", "text/plain"),
    ("log", "text/plain"),
    // Archives
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
];

/// Extract the lowercased extension from a file name.
fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Look up the MIME type for a file name.
///
/// Unknown extensions (and names without one) map to
/// `application/octet-stream`.
pub fn mime_type(file_name: &str) -> &'static str {
    let Some(ext) = extension_of(file_name) else {
        return OCTET_STREAM;
    };
    MIME_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}

/// Check whether a file name's extension is on the upload allow-list.
pub fn is_extension_allowed(file_name: &str) -> bool {
    match extension_of(file_name) {
        Some(ext) => MIME_TABLE.iter().any(|(e, _)| *e == ext),
        None => false,
    }
}

/// The allow-list as a human-readable string (".gif, .jpg, ...").
pub fn supported_extensions() -> String {
    let exts: Vec<String> = MIME_TABLE.iter().map(|(e, _)| format!(".{e}")).collect();
    exts.join(", ")
}
