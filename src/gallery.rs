//! Rendered gallery items and the owner of all playback-related state.

use std::time::Instant;

use crate::config::Config;
use crate::content::{ContentStore, VideoRecord};
use crate::detail::{DetailPanel, PanelMetrics};
use crate::error::MediaError;
use crate::media::MediaHandle;
use crate::overlay::NavOverlay;
use crate::playback::{PlaybackGate, PlaybackMemory};
use crate::scroll::ScrollNavigator;
use crate::visibility::{Viewport, VisibilityRules};

pub enum MediaState<M> {
    Ready(M),
    /// The clip is shown as a placeholder card and never played again.
    Failed(MediaError),
}

pub struct GalleryItem<M> {
    /// Position of the record in the content store.
    pub index: usize,
    media: MediaState<M>,
    pub detail: DetailPanel,
    pub(crate) intersecting: bool,
    loaded: bool,
}

impl<M: MediaHandle> GalleryItem<M> {
    fn new(index: usize, media: Result<M, MediaError>) -> Self {
        let media = match media {
            Ok(media) => MediaState::Ready(media),
            Err(e) => {
                log::warn!("Clip {} unavailable: {}", index, e);
                MediaState::Failed(e)
            }
        };
        Self {
            index,
            media,
            detail: DetailPanel::default(),
            intersecting: false,
            loaded: false,
        }
    }

    pub fn media(&self) -> Option<&M> {
        match &self.media {
            MediaState::Ready(media) => Some(media),
            MediaState::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&MediaError> {
        match &self.media {
            MediaState::Ready(_) => None,
            MediaState::Failed(e) => Some(e),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error().is_some()
    }

    /// Still waiting for the first decoded frame.
    pub fn is_loading(&self) -> bool {
        !self.loaded && !self.has_error()
    }

    pub fn is_playing(&self) -> bool {
        self.media().is_some_and(|m| !m.is_paused())
    }

    /// Plays if the gate allows it and the clip is paused. Returns whether playback started.
    pub(crate) fn start(&mut self, gate: PlaybackGate) -> bool {
        if !gate.allows_playback() {
            return false;
        }
        let MediaState::Ready(media) = &mut self.media else {
            return false;
        };
        if !media.is_paused() {
            return false;
        }
        match media.play() {
            Ok(()) => {
                log::debug!("Clip {} playing", self.index);
                true
            }
            Err(e) => {
                log::warn!("Autoplay blocked for clip {}: {}", self.index, e);
                false
            }
        }
    }

    /// Pauses if playing. Returns whether a pause was issued.
    pub(crate) fn stop(&mut self) -> bool {
        match &mut self.media {
            MediaState::Ready(media) if !media.is_paused() => {
                media.pause();
                log::debug!("Clip {} paused", self.index);
                true
            }
            _ => false,
        }
    }
}

pub struct Gallery<M> {
    pub(crate) config: Config,
    pub(crate) rules: VisibilityRules,
    store: ContentStore,
    pub(crate) items: Vec<GalleryItem<M>>,
    pub(crate) viewport: Viewport,
    pub(crate) gate: PlaybackGate,
    pub(crate) window_memory: PlaybackMemory,
    pub(crate) page_memory: PlaybackMemory,
    pub(crate) menu: NavOverlay,
    pub(crate) scroll: ScrollNavigator,
}

impl<M: MediaHandle> Gallery<M> {
    pub fn new(config: Config) -> Self {
        let rules = VisibilityRules::from(&config.playback);
        let scroll = ScrollNavigator::new(config.scroll_cooldown(), config.scroll_animation());
        Self {
            config,
            rules,
            store: ContentStore::default(),
            items: Vec::new(),
            viewport: Viewport::default(),
            gate: PlaybackGate::default(),
            window_memory: PlaybackMemory::default(),
            page_memory: PlaybackMemory::default(),
            menu: NavOverlay::default(),
            scroll,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn items(&self) -> &[GalleryItem<M>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&GalleryItem<M>> {
        self.items.get(index)
    }

    pub fn record(&self, index: usize) -> Option<&VideoRecord> {
        self.store.get(index)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Appends one record and renders exactly one new item for it.
    pub fn add_video<L>(&mut self, record: VideoRecord, loader: &mut L) -> usize
    where
        L: FnMut(&VideoRecord) -> Result<M, MediaError>,
    {
        let media = loader(&record);
        let index = self.store.push(record);
        self.items.push(GalleryItem::new(index, media));
        log::info!("Clip {} added, {} in gallery", index, self.items.len());
        self.evaluate_visibility();
        index
    }

    /// Drops every rendered item and renders the given records from scratch.
    pub fn update_video_data<L>(&mut self, records: Vec<VideoRecord>, loader: &mut L)
    where
        L: FnMut(&VideoRecord) -> Result<M, MediaError>,
    {
        self.items.clear();
        self.window_memory.clear();
        self.page_memory.clear();
        self.scroll.cancel();

        self.store.replace(records);
        self.items = self
            .store
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| GalleryItem::new(index, loader(record)))
            .collect();

        self.viewport.offset_y = self
            .viewport
            .offset_y
            .min(self.viewport.max_offset(self.items.len()));
        log::info!("Gallery rendered with {} clips", self.items.len());
        self.evaluate_visibility();
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if height > 0.0 && self.viewport.height > 0.0 {
            // Keep the same item at the top when the item height changes.
            self.viewport.offset_y *= height / self.viewport.height;
        }
        self.viewport.width = width;
        self.viewport.height = height;
        self.evaluate_visibility();
    }

    pub fn set_scroll_offset(&mut self, offset_y: f32) {
        self.viewport.offset_y = offset_y.max(0.0);
        self.evaluate_visibility();
    }

    pub fn mark_loaded(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            if !item.loaded {
                log::debug!("Clip {} first frame", index);
                item.loaded = true;
            }
        }
    }

    /// Swaps the clip for its placeholder card; the media handle is dropped.
    pub fn mark_failed(&mut self, index: usize, error: MediaError) {
        if let Some(item) = self.items.get_mut(index) {
            if !item.has_error() {
                log::error!("Clip {} failed: {}", index, error);
                item.media = MediaState::Failed(error);
            }
        }
    }

    pub fn panel_metrics(&self) -> PanelMetrics {
        PanelMetrics::for_viewport_width(self.viewport.width)
    }

    pub fn toggle_detail(&mut self, index: usize) {
        let metrics = self.panel_metrics();
        let duration = self.config.detail_animation();
        let (Some(record), Some(item)) = (self.store.get(index), self.items.get_mut(index)) else {
            return;
        };
        item.detail.toggle(record, metrics, duration);
        log::debug!("Clip {} details {:?}", index, item.detail.state());
    }

    /// Collapses every expanded panel. Returns how many were collapsed.
    pub fn collapse_all_details(&mut self) -> usize {
        let metrics = self.panel_metrics();
        let duration = self.config.detail_animation();
        let mut collapsed = 0;
        for item in self.items.iter_mut().filter(|item| item.detail.is_expanded()) {
            item.detail.collapse(metrics, duration);
            collapsed += 1;
        }
        collapsed
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating() || self.items.iter().any(|item| item.detail.is_animating())
    }

    /// Advances every running animation. Returns the new scroll offset when a smooth scroll moved.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        for item in &mut self.items {
            item.detail.tick(now);
        }
        let offset = self.scroll.tick(now)?;
        self.set_scroll_offset(offset);
        Some(offset)
    }

    /// Starts clips crossing into sufficient visibility and stops those that are not.
    ///
    /// An edge that arrives while the gate is closed stays pending: the clip is
    /// not marked intersecting, so the next pass with the gate open starts it.
    pub(crate) fn evaluate_visibility(&mut self) {
        let height = self.viewport.height;
        let gate = self.gate;
        for (position, item) in self.items.iter_mut().enumerate() {
            let rect = self.viewport.item_rect(position);
            let visible = self.rules.is_sufficiently_visible(rect, height);
            if !visible {
                item.stop();
                item.intersecting = false;
            } else if !item.intersecting && gate.allows_playback() {
                item.start(gate);
                item.intersecting = true;
            }
        }
    }
}
