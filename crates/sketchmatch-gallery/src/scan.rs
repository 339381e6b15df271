//! Gallery directory scanning.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use sketchmatch_core::file_safety::allowed_image_extension;
use sketchmatch_core::{Error, Result};

/// A stored reference photo, identified by its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Filename within the gallery directory, used as the match label.
    pub label: String,
    /// Full path to the image file.
    pub path: PathBuf,
}

impl Candidate {
    /// Read the candidate's image bytes.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// List the candidate photos in a gallery directory.
///
/// Only regular files with an allowed image extension are returned. Results
/// are sorted lexicographically by label so that scan order — and therefore
/// the first-seen-wins tie-break — is deterministic across platforms.
pub fn scan_gallery(dir: &Path) -> Result<Vec<Candidate>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(format!(
            "photo directory {}",
            dir.display()
        )));
    }

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, dir = %dir.display(), "Skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(label) = path.file_name().and_then(|n| n.to_str()) else {
            warn!(path = %path.display(), "Skipping non-UTF-8 filename");
            continue;
        };
        if !allowed_image_extension(label) {
            continue;
        }
        candidates.push(Candidate {
            label: label.to_string(),
            path,
        });
    }

    candidates.sort_by(|a, b| a.label.cmp(&b.label));
    debug!(
        candidate_count = candidates.len(),
        dir = %dir.display(),
        "Scanned gallery"
    );
    Ok(candidates)
}
