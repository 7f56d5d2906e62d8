//! Discovery of dated episode artifacts (`ai_news_YYYYMMDD.<ext>`) in the
//! audio directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{EpisodeId, Result};

pub fn artifact_path(dir: &Path, id: EpisodeId, extension: &str) -> PathBuf {
    dir.join(id.file_name(extension))
}

/// Every artifact with the given extension, oldest stamp first. Files whose
/// stem is not a valid episode id are ignored.
pub fn list_artifacts(dir: &Path, extension: &str) -> Result<Vec<(EpisodeId, PathBuf)>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match stem.parse::<EpisodeId>() {
            Ok(id) => found.push((id, path)),
            Err(_) => tracing::debug!("Skipping non-episode file {}", path.display()),
        }
    }
    found.sort();
    Ok(found)
}

/// The artifact with the newest stamp, if any.
pub fn latest_artifact(dir: &Path, extension: &str) -> Result<Option<(EpisodeId, PathBuf)>> {
    Ok(list_artifacts(dir, extension)?.pop())
}
