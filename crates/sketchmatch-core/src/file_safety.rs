//! Filename validation helpers for uploaded sketches and gallery photos.
//!
//! Two layers:
//! 1. Extension allowlist (png/jpg/jpeg only)
//! 2. Filename sanitization before anything touches the filesystem

use crate::defaults::ALLOWED_EXTENSIONS;

/// Returns true if the filename carries one of the allowed image extensions.
///
/// Case-insensitive. A name without a `.` never qualifies.
pub fn allowed_image_extension(filename: &str) -> bool {
    let Some((stem, ext)) = filename.rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() {
        // dotfiles like ".png" have no stem to use as a label
        return false;
    }
    let ext = ext.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

/// Derive the person label from a photo filename: everything before the
/// first `.` (so "alice.v2.jpg" labels as "alice").
pub fn label_stem(filename: &str) -> &str {
    filename.split('.').next().unwrap_or(filename)
}

/// Sanitize a client-supplied filename for safe storage.
///
/// Removes path components, replaces characters that are unsafe on common
/// filesystems, and collapses empty results to "unnamed".
pub fn sanitize_filename(filename: &str) -> String {
    // Remove path components
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    // Replace dangerous characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Strip leading dots so the result is never hidden or a traversal token
    let sanitized = sanitized.trim_start_matches('.').to_string();

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}
