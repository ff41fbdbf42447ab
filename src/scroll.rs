//! Wheel-driven snap scrolling between gallery items.

use std::time::{Duration, Instant};

use crate::gallery::Gallery;
use crate::media::MediaHandle;
use crate::visibility::{straddles_center, Viewport};

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
}

#[derive(Debug, Clone)]
pub struct ScrollNavigator {
    cooldown: Duration,
    duration: Duration,
    last_trigger: Option<Instant>,
    animation: Option<ScrollAnimation>,
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

impl ScrollNavigator {
    pub fn new(cooldown: Duration, duration: Duration) -> Self {
        Self {
            cooldown,
            duration,
            last_trigger: None,
            animation: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn cancel(&mut self) {
        self.animation = None;
    }

    fn cooling_down(&self, now: Instant) -> bool {
        self.last_trigger
            .is_some_and(|last| now.saturating_duration_since(last) < self.cooldown)
    }

    /// Picks the item to scroll to for a wheel event; `delta_y > 0` scrolls down.
    ///
    /// The cooldown is armed for every event that gets past it, including
    /// those that end up at the first or last item and go nowhere.
    pub fn on_wheel(
        &mut self,
        now: Instant,
        delta_y: f32,
        viewport: &Viewport,
        count: usize,
    ) -> Option<usize> {
        if count == 0 || self.cooling_down(now) {
            return None;
        }
        self.last_trigger = Some(now);

        let current = (0..count)
            .filter(|&i| straddles_center(viewport.item_rect(i), viewport.height))
            .last()
            .unwrap_or(0);

        if delta_y > 0.0 && current + 1 < count {
            Some(current + 1)
        } else if delta_y < 0.0 && current > 0 {
            Some(current - 1)
        } else {
            None
        }
    }

    fn animate(&mut self, now: Instant, from: f32, to: f32) {
        self.animation = Some(ScrollAnimation { from, to, started: now });
    }

    /// Offset for this frame, or `None` when no scroll is running.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let animation = self.animation?;
        let elapsed = now.saturating_duration_since(animation.started).as_secs_f32();
        let t = (elapsed / self.duration.as_secs_f32().max(f32::EPSILON)).clamp(0.0, 1.0);
        if t >= 1.0 {
            self.animation = None;
            return Some(animation.to);
        }
        Some(animation.from + (animation.to - animation.from) * ease_out(t))
    }
}

impl<M: MediaHandle> Gallery<M> {
    /// Handles one wheel event. Returns the item a smooth scroll was started towards.
    pub fn on_wheel(&mut self, now: Instant, delta_y: f32) -> Option<usize> {
        let target = self
            .scroll
            .on_wheel(now, delta_y, &self.viewport, self.items.len())?;
        let from = self.viewport.offset_y;
        let to = self.viewport.offset_of(target);
        log::debug!("Snap scroll {} -> clip {}", from, target);
        self.scroll.animate(now, from, to);
        Some(target)
    }
}
