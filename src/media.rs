//! The narrow playback surface the controllers need from a clip.

use gstreamer::prelude::*;
use iced_video_player::Video;

use crate::error::PlaybackRejected;

pub trait MediaHandle {
    /// Starts playback. A rejection leaves the clip paused.
    fn play(&mut self) -> Result<(), PlaybackRejected>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
}

impl MediaHandle for Video {
    fn play(&mut self) -> Result<(), PlaybackRejected> {
        // Ask the pipeline first: `set_paused` treats a refused state change as fatal.
        self.pipeline()
            .set_state(gstreamer::State::Playing)
            .map_err(|e| PlaybackRejected(e.to_string()))?;
        self.set_paused(false);
        Ok(())
    }

    fn pause(&mut self) {
        self.set_paused(true);
    }

    fn is_paused(&self) -> bool {
        self.paused()
    }
}
