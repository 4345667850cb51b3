//! Output file naming.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Fallback output name when the service does not report one.
const DEFAULT_OUTPUT_NAME: &str = "b2_download";

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    // Sanitize remaining problematic characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Decode the percent-encoded value of the `X-Bz-File-Name` response header
/// into a usable local file name.
///
/// Stored names may contain folder segments ("photos/cat.jpg"); only the
/// final segment is used. Returns `None` when the value cannot be decoded or
/// sanitized, in which case the caller falls back to a fixed name.
pub fn decode_bz_file_name(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    let name = decoded.rsplit('/').next()?.trim();
    if name.is_empty() {
        return None;
    }

    sanitize_filename(name).ok()
}

/// Resolve the output path for a download.
///
/// An explicitly configured path wins; otherwise the service-reported file
/// name is used in the working directory; otherwise a fixed fallback name.
pub fn resolve_output_path(configured: Option<&Path>, reported_name: Option<&str>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }

    if let Some(name) = reported_name.and_then(decode_bz_file_name) {
        return PathBuf::from(name);
    }

    PathBuf::from(DEFAULT_OUTPUT_NAME)
}
