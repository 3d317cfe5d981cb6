use crate::youtube::VideoId;
use std::fs;
use std::path::{Path, PathBuf};

pub const TIMESTAMPS_FILE: &str = "timestamps.txt";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a timestamp text file
pub fn read_text(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Location of the saved timestamps for a video
pub fn timestamps_path(artifacts_dir: &Path, video_id: &VideoId) -> PathBuf {
    artifacts_dir.join(video_id.as_str()).join(TIMESTAMPS_FILE)
}

/// Save timestamp text under `<artifacts_dir>/<video_id>/timestamps.txt`.
///
/// Blank text is not written; returns the path only when a file was written.
pub fn save_timestamps(
    artifacts_dir: &Path,
    video_id: &VideoId,
    text: &str,
) -> Result<Option<PathBuf>, IoError> {
    if text.trim().is_empty() {
        log::debug!("not saving empty timestamps for {video_id}");
        return Ok(None);
    }

    let path = timestamps_path(artifacts_dir, video_id);

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&path, text).map_err(IoError::Io)?;
    log::info!("File saved: {}", path.display());
    Ok(Some(path))
}

/// Load previously saved timestamp text for a video
pub fn load_timestamps(artifacts_dir: &Path, video_id: &VideoId) -> Result<String, IoError> {
    read_text(&timestamps_path(artifacts_dir, video_id))
}
