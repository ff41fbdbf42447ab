use iced_video_player::Video;
use std::path::PathBuf;

use crate::config::Config;
use crate::gallery::Gallery;

/// Application state: the gallery plus the window chrome around it.
pub struct App {
    pub gallery: Gallery<Video>,
    /// Manifest the catalogue came from; `None` means the built-in catalogue.
    pub manifest: Option<PathBuf>,
    /// Bumped on every render so the bus monitor re-subscribes to the new pipelines.
    pub render_generation: u64,
    pub window_minimized: bool,
    pub status: String,
}

impl App {
    pub fn new(config: Config) -> Self {
        App {
            manifest: config.manifest.clone(),
            gallery: Gallery::new(config),
            render_generation: 0,
            window_minimized: false,
            status: String::new(),
        }
    }
}
