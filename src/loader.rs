use iced_video_player::Video;
use std::sync::{Arc, Mutex};

use crate::content::VideoRecord;
use crate::error::MediaError;

// Global lock to prevent simultaneous GStreamer pipeline initialization
// which causes FLUSH_START event deadlocks when loading multiple videos
static GSTREAMER_INIT_LOCK: std::sync::OnceLock<Arc<Mutex<()>>> = std::sync::OnceLock::new();

fn get_gstreamer_lock() -> Arc<Mutex<()>> {
    GSTREAMER_INIT_LOCK
        .get_or_init(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Build a muted, looping, paused player for a record.
///
/// Clips start paused; the visibility pass decides when they play.
pub fn load_clip(record: &VideoRecord) -> Result<Video, MediaError> {
    let path = std::path::absolute(&record.src)
        .map_err(|_| MediaError::InvalidPath(record.src.clone()))?;
    if std::fs::metadata(&path).is_err() {
        return Err(MediaError::InvalidPath(path));
    }
    let url =
        url::Url::from_file_path(&path).map_err(|_| MediaError::InvalidPath(path.clone()))?;

    let lock = get_gstreamer_lock();
    let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut video = Video::new(&url).map_err(|e| MediaError::Load(e.to_string()))?;
    video.set_muted(true);
    video.set_looping(true);
    video.set_paused(true);
    log::info!(
        "Video loaded: title={}, path={}, fps={}",
        record.title,
        path.display(),
        video.framerate()
    );
    Ok(video)
}
