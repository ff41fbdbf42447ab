//! Shared fixtures for controller tests.

use crate::config::Config;
use crate::content::{Crew, VideoRecord};
use crate::error::{MediaError, PlaybackRejected};
use crate::gallery::Gallery;
use crate::media::MediaHandle;

/// In-memory media that counts the calls it receives.
#[derive(Debug, Default)]
pub struct FakeMedia {
    pub playing: bool,
    pub reject_play: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
}

impl MediaHandle for FakeMedia {
    fn play(&mut self) -> Result<(), PlaybackRejected> {
        self.play_calls += 1;
        if self.reject_play {
            return Err(PlaybackRejected("autoplay blocked".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        self.playing = false;
    }

    fn is_paused(&self) -> bool {
        !self.playing
    }
}

pub fn record(title: &str) -> VideoRecord {
    VideoRecord::new(format!("videos/{}.webm", title.to_lowercase()), title, "Robert Marsh")
        .with_crew(Crew::from_pairs([
            ("director", "Robert Marsh"),
            ("producer", "[Producer Name]"),
        ]))
        .with_description(["A short film about return.", "[Optional third paragraph if needed.]"])
}

/// Loader that succeeds for every record.
pub fn ok_loader(_: &VideoRecord) -> Result<FakeMedia, MediaError> {
    Ok(FakeMedia::default())
}

/// Gallery of `count` full-viewport items in an 800x1000 window, scrolled to the top.
pub fn gallery(count: usize) -> Gallery<FakeMedia> {
    let mut gallery = Gallery::new(Config::default());
    gallery.set_viewport_size(800.0, 1000.0);
    let records = (0..count).map(|i| record(&format!("Clip{}", i))).collect();
    gallery.update_video_data(records, &mut ok_loader);
    gallery
}

pub fn playing(gallery: &Gallery<FakeMedia>) -> Vec<usize> {
    gallery
        .items()
        .iter()
        .filter(|item| item.media().is_some_and(|m| m.playing))
        .map(|item| item.index)
        .collect()
}
