//! Viewport geometry: intersection ratios and the resume band.
//!
//! Every gallery item is exactly one viewport tall and items are stacked
//! without gaps, so item `i` spans `[i * h, (i + 1) * h]` in content space.

use crate::config::PlaybackSection;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical scroll offset of the gallery.
    pub offset_y: f32,
}

/// An item's vertical extent relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRect {
    pub top: f32,
    pub bottom: f32,
}

impl ItemRect {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

impl Viewport {
    pub fn item_height(&self) -> f32 {
        self.height.max(0.0)
    }

    pub fn item_rect(&self, index: usize) -> ItemRect {
        let h = self.item_height();
        let top = index as f32 * h - self.offset_y;
        ItemRect { top, bottom: top + h }
    }

    /// Scroll offset that aligns the item's top edge with the viewport's.
    pub fn offset_of(&self, index: usize) -> f32 {
        index as f32 * self.item_height()
    }

    pub fn max_offset(&self, count: usize) -> f32 {
        (count.saturating_sub(1)) as f32 * self.item_height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityRules {
    pub threshold: f32,
    pub bottom_margin: f32,
    pub band_top: f32,
    pub band_bottom: f32,
}

impl From<&PlaybackSection> for VisibilityRules {
    fn from(section: &PlaybackSection) -> Self {
        Self {
            threshold: section.visibility_threshold,
            bottom_margin: section.bottom_margin,
            band_top: section.resume_band_top,
            band_bottom: section.resume_band_bottom,
        }
    }
}

impl Default for VisibilityRules {
    fn default() -> Self {
        Self::from(&PlaybackSection::default())
    }
}

impl VisibilityRules {
    /// Fraction of the item inside the viewport once the bottom margin is cut off.
    pub fn intersection_ratio(&self, rect: ItemRect, viewport_height: f32) -> f32 {
        let height = rect.height();
        if height <= 0.0 || viewport_height <= 0.0 {
            return 0.0;
        }
        let root_bottom = viewport_height * (1.0 - self.bottom_margin);
        let overlap = rect.bottom.min(root_bottom) - rect.top.max(0.0);
        (overlap / height).clamp(0.0, 1.0)
    }

    pub fn is_sufficiently_visible(&self, rect: ItemRect, viewport_height: f32) -> bool {
        let ratio = self.intersection_ratio(rect, viewport_height);
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Looser test used when resuming after blur, hide or menu close.
    pub fn in_resume_band(&self, rect: ItemRect, viewport_height: f32) -> bool {
        rect.top < viewport_height * self.band_top
            && rect.bottom > viewport_height * self.band_bottom
    }
}

pub fn straddles_center(rect: ItemRect, viewport_height: f32) -> bool {
    let center = viewport_height / 2.0;
    rect.top <= center && rect.bottom >= center
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(offset_y: f32) -> Viewport {
        Viewport {
            width: 800.0,
            height: 1000.0,
            offset_y,
        }
    }

    #[test]
    fn item_at_top_is_fully_visible_within_root() {
        let rules = VisibilityRules::default();
        let rect = viewport(0.0).item_rect(0);
        // The bottom 10% of the viewport does not count.
        assert!((rules.intersection_ratio(rect, 1000.0) - 0.9).abs() < 1e-4);
        assert!(rules.is_sufficiently_visible(rect, 1000.0));
    }

    #[test]
    fn bottom_margin_shrinks_the_root() {
        let rules = VisibilityRules::default();
        // Next item peeks 350px into the viewport; only 250px of it are inside the root.
        let rect = viewport(350.0).item_rect(1);
        assert_eq!(rect.top, 650.0);
        assert!((rules.intersection_ratio(rect, 1000.0) - 0.25).abs() < 1e-4);
        assert!(!rules.is_sufficiently_visible(rect, 1000.0));

        let rect = viewport(420.0).item_rect(1);
        assert!(rules.is_sufficiently_visible(rect, 1000.0));
    }

    #[test]
    fn offscreen_items_have_zero_ratio() {
        let rules = VisibilityRules::default();
        assert_eq!(rules.intersection_ratio(viewport(0.0).item_rect(3), 1000.0), 0.0);
        assert_eq!(rules.intersection_ratio(viewport(0.0).item_rect(0), 0.0), 0.0);
    }

    #[test]
    fn resume_band_requires_overlap_with_the_middle() {
        let rules = VisibilityRules::default();
        assert!(rules.in_resume_band(viewport(0.0).item_rect(0), 1000.0));
        // Item scrolled up so its bottom sits at 250px: fails bottom > 300.
        assert!(!rules.in_resume_band(viewport(750.0).item_rect(0), 1000.0));
        // Next item starts at 750px: fails top < 700.
        assert!(!rules.in_resume_band(viewport(250.0).item_rect(1), 1000.0));
        assert!(rules.in_resume_band(viewport(350.0).item_rect(1), 1000.0));
    }

    #[test]
    fn center_straddle_picks_the_item_under_the_midline() {
        let vp = viewport(1200.0);
        assert!(!straddles_center(vp.item_rect(0), 1000.0));
        assert!(straddles_center(vp.item_rect(1), 1000.0));
        assert!(!straddles_center(vp.item_rect(2), 1000.0));
    }

    #[test]
    fn offsets_align_items_to_the_top() {
        let vp = viewport(0.0);
        assert_eq!(vp.offset_of(3), 3000.0);
        assert_eq!(vp.max_offset(4), 3000.0);
        assert_eq!(vp.max_offset(0), 0.0);
    }
}
