//! Window-level playback suspension: focus, hide/show and the resume routines.
//!
//! Every play request goes through [`PlaybackGate`]; a clip may only start
//! while the window is focused and shown and the menu is closed.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::gallery::{Gallery, GalleryItem};
use crate::media::MediaHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackGate {
    pub window_focused: bool,
    pub window_shown: bool,
    pub menu_open: bool,
}

impl Default for PlaybackGate {
    fn default() -> Self {
        Self {
            window_focused: true,
            window_shown: true,
            menu_open: false,
        }
    }
}

impl PlaybackGate {
    pub fn allows_playback(&self) -> bool {
        self.window_focused && self.window_shown && !self.menu_open
    }
}

/// Indices of clips that were playing when playback was suspended.
#[derive(Debug, Clone, Default)]
pub struct PlaybackMemory {
    indices: BTreeSet<usize>,
}

impl PlaybackMemory {
    /// Pauses every playing clip and remembers it. Adds to a memory not yet resumed.
    fn capture<M: MediaHandle>(&mut self, items: &mut [GalleryItem<M>]) {
        for item in items.iter_mut() {
            if item.stop() {
                self.indices.insert(item.index);
            }
        }
    }

    fn take(&mut self) -> BTreeSet<usize> {
        std::mem::take(&mut self.indices)
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<M: MediaHandle> Gallery<M> {
    pub fn is_playback_allowed(&self) -> bool {
        self.gate.allows_playback()
    }

    /// Restarts the given clips if they still sit in the resume band.
    fn resume_remembered(&mut self, indices: BTreeSet<usize>) -> usize {
        let height = self.viewport.height;
        let gate = self.gate;
        let mut resumed = 0;
        for index in indices {
            let rect = self.viewport.item_rect(index);
            let in_band = self.rules.in_resume_band(rect, height);
            if let Some(item) = self.items.get_mut(index) {
                if in_band && item.start(gate) {
                    resumed += 1;
                }
            }
        }
        resumed
    }

    pub fn window_blurred(&mut self) {
        self.gate.window_focused = false;
        self.window_memory.capture(&mut self.items);
        log::debug!("Window blurred, {} clips suspended", self.window_memory.len());
    }

    pub fn window_focused(&mut self) {
        self.gate.window_focused = true;
        let remembered = self.window_memory.take();
        let resumed = self.resume_remembered(remembered);
        self.evaluate_visibility();
        log::debug!("Window focused, {} clips resumed", resumed);
    }

    pub fn window_hidden(&mut self) {
        self.gate.window_shown = false;
        self.page_memory.capture(&mut self.items);
        log::debug!("Window hidden, {} clips suspended", self.page_memory.len());
    }

    /// Marks the window shown. The caller resumes after the returned delay.
    pub fn window_shown(&mut self) -> Duration {
        self.gate.window_shown = true;
        self.config.show_resume_delay()
    }

    /// Deferred half of [`Gallery::window_shown`].
    pub fn resume_after_show(&mut self) {
        if !self.gate.window_shown {
            // Hidden again before the timer fired; keep the memory for the next show.
            return;
        }
        let remembered = self.page_memory.take();
        let resumed = self.resume_remembered(remembered);
        self.evaluate_visibility();
        log::debug!("Window shown, {} clips resumed", resumed);
    }

    pub fn pause_all(&mut self) {
        for item in &mut self.items {
            item.stop();
        }
    }

    /// Starts every paused clip in the resume band, whether or not it was playing before.
    pub fn resume_visible(&mut self) {
        let height = self.viewport.height;
        let gate = self.gate;
        for (position, item) in self.items.iter_mut().enumerate() {
            let rect = self.viewport.item_rect(position);
            if self.rules.in_resume_band(rect, height) {
                item.start(gate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::test_utils::{gallery, playing};

    #[test]
    fn blur_pauses_everything_and_focus_resumes_it() {
        let mut gallery = gallery(4);
        // Item 0 spans -500..500 and item 1 spans 500..1500: both past the 0.3 ratio.
        gallery.set_scroll_offset(500.0);
        assert_eq!(playing(&gallery), vec![0, 1]);

        gallery.window_blurred();
        assert!(playing(&gallery).is_empty());
        assert!(!gallery.is_playback_allowed());

        gallery.window_focused();
        assert_eq!(playing(&gallery), vec![0, 1]);
    }

    #[test]
    fn focus_leaves_items_outside_the_band_paused() {
        let mut gallery = gallery(4);
        gallery.set_scroll_offset(500.0);
        gallery.window_blurred();
        // Layout moved while the window was in the background.
        gallery.set_scroll_offset(250.0);
        gallery.window_focused();

        // Item 1 now starts at 750, below the band; it stays paused.
        assert_eq!(playing(&gallery), vec![0]);
    }

    #[test]
    fn clip_scrolled_into_view_while_blurred_starts_on_focus() {
        let mut gallery = gallery(4);
        gallery.window_blurred();
        gallery.set_scroll_offset(1000.0);
        assert!(playing(&gallery).is_empty());

        gallery.window_focused();
        assert_eq!(playing(&gallery), vec![1]);

        // Later scrolls within the same item do not pause or restart it.
        gallery.set_scroll_offset(1005.0);
        gallery.set_scroll_offset(1010.0);
        assert_eq!(playing(&gallery), vec![1]);
        assert_eq!(gallery.item(1).unwrap().media().unwrap().play_calls, 1);
    }

    #[test]
    fn focus_does_not_start_clips_that_left_view() {
        let mut gallery = gallery(4);
        gallery.window_blurred();
        gallery.set_scroll_offset(500.0);
        gallery.set_scroll_offset(0.0);
        gallery.window_focused();
        assert_eq!(playing(&gallery), vec![0]);
    }

    #[test]
    fn blur_during_snap_scroll_still_plays_the_target_on_focus() {
        let mut gallery = gallery(4);
        let start = Instant::now();
        assert_eq!(gallery.on_wheel(start, 1.0), Some(1));
        // Item 1 is still under the threshold this early in the scroll.
        gallery.tick(start + Duration::from_millis(50));
        assert_eq!(playing(&gallery), vec![0]);

        gallery.window_blurred();
        assert_eq!(gallery.tick(start + Duration::from_millis(600)), Some(1000.0));
        assert!(playing(&gallery).is_empty());

        gallery.window_focused();
        gallery.tick(start + Duration::from_millis(700));
        assert_eq!(playing(&gallery), vec![1]);
    }

    #[test]
    fn clip_scrolled_into_view_while_hidden_starts_after_show() {
        let mut gallery = gallery(4);
        gallery.window_hidden();
        gallery.set_scroll_offset(2000.0);
        gallery.window_shown();
        assert!(playing(&gallery).is_empty());

        gallery.resume_after_show();
        assert_eq!(playing(&gallery), vec![2]);
    }

    #[test]
    fn nothing_starts_while_blurred() {
        let mut gallery = gallery(4);
        gallery.window_blurred();
        gallery.set_scroll_offset(1000.0);
        assert!(playing(&gallery).is_empty());
    }

    #[test]
    fn show_resumes_after_the_delay() {
        let mut gallery = gallery(3);
        gallery.window_hidden();
        assert!(playing(&gallery).is_empty());

        let delay = gallery.window_shown();
        assert_eq!(delay.as_millis(), 100);
        assert!(playing(&gallery).is_empty());

        gallery.resume_after_show();
        assert_eq!(playing(&gallery), vec![0]);
    }

    #[test]
    fn stale_show_timer_keeps_memory_while_hidden() {
        let mut gallery = gallery(3);
        gallery.window_hidden();
        gallery.window_shown();
        gallery.window_hidden();
        gallery.resume_after_show();
        assert!(playing(&gallery).is_empty());

        gallery.window_shown();
        gallery.resume_after_show();
        assert_eq!(playing(&gallery), vec![0]);
    }

    #[test]
    fn focus_and_hide_memories_are_independent() {
        let mut gallery = gallery(3);
        gallery.window_blurred();
        gallery.window_hidden();
        gallery.window_shown();
        gallery.resume_after_show();
        // Still unfocused: nothing may play.
        assert!(playing(&gallery).is_empty());

        gallery.window_focused();
        assert_eq!(playing(&gallery), vec![0]);
    }

    #[test]
    fn resume_visible_restarts_band_items_only() {
        let mut gallery = gallery(4);
        gallery.pause_all();
        assert!(playing(&gallery).is_empty());
        gallery.set_scroll_offset(250.0);
        gallery.resume_visible();
        assert_eq!(playing(&gallery), vec![0]);
    }
}
