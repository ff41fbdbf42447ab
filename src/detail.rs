//! Expand/collapse state machine for the per-clip credits panel.
//!
//! The panel's logical state flips as soon as a toggle is requested; the
//! height animation then catches up frame by frame. Content is filled in on
//! the first expansion and kept for the lifetime of the item.

use std::time::{Duration, Instant};

use crate::content::VideoRecord;

pub const TITLE_SIZE: f32 = 34.0;
pub const DIRECTOR_SIZE: f32 = 18.0;
pub const BODY_SIZE: f32 = 15.0;
pub const HEADING_SIZE: f32 = 13.0;
pub const LINE_HEIGHT: f32 = 1.4;
pub const PARAGRAPH_SPACING: f32 = 12.0;
pub const SECTION_SPACING: f32 = 24.0;
pub const CREW_ROW_SPACING: f32 = 6.0;

/// Distance between the bottom of the item and the bottom of the info panel.
pub const INFO_BOTTOM_OFFSET: f32 = 60.0;
/// Gap between the director line and the expanded section.
pub const EXPANDED_SECTION_GAP: f32 = 25.0;
pub const GRADIENT_PADDING: f32 = 40.0;
pub const DEFAULT_GRADIENT_HEIGHT: f32 = 200.0;

pub const PANEL_MARGIN: f32 = 48.0;
const MAX_PANEL_WIDTH: f32 = 640.0;
const MIN_PANEL_WIDTH: f32 = 200.0;
// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

/// Filled-in credits, with placeholder values already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub paragraphs: Vec<String>,
    pub crew: Vec<(String, String)>,
}

impl PanelContent {
    pub fn from_record(record: &VideoRecord) -> Self {
        Self {
            paragraphs: record.visible_paragraphs(),
            crew: record.visible_crew(),
        }
    }
}

/// Text layout estimate used in place of measuring rendered widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub width: f32,
}

impl PanelMetrics {
    pub fn for_viewport_width(viewport_width: f32) -> Self {
        Self {
            width: (viewport_width - 2.0 * PANEL_MARGIN).clamp(MIN_PANEL_WIDTH, MAX_PANEL_WIDTH),
        }
    }

    fn lines(&self, text: &str, size: f32) -> usize {
        let per_line = ((self.width / (size * GLYPH_WIDTH)).floor() as usize).max(1);
        text.chars().count().div_ceil(per_line).max(1)
    }

    fn block_height(&self, text: &str, size: f32) -> f32 {
        self.lines(text, size) as f32 * size * LINE_HEIGHT
    }

    pub fn title_height(&self, title: &str) -> f32 {
        self.block_height(title, TITLE_SIZE)
    }

    pub fn director_height(&self, director: &str) -> f32 {
        self.block_height(director, DIRECTOR_SIZE)
    }

    /// Natural height of the expanded section: description, then the crew block.
    pub fn content_height(&self, content: &PanelContent) -> f32 {
        let description: f32 = content
            .paragraphs
            .iter()
            .map(|p| self.block_height(p, BODY_SIZE))
            .sum::<f32>()
            + PARAGRAPH_SPACING * content.paragraphs.len().saturating_sub(1) as f32;

        let crew_rows: f32 = content
            .crew
            .iter()
            .map(|(role, name)| self.block_height(&format!("{}: {}", role, name), BODY_SIZE))
            .sum::<f32>()
            + CREW_ROW_SPACING * content.crew.len() as f32;

        description + SECTION_SPACING + HEADING_SIZE * LINE_HEIGHT + crew_rows
    }
}

/// Backdrop height that covers the whole expanded panel.
pub fn gradient_height(title_height: f32, director_height: f32, content_height: f32) -> f32 {
    let panel = title_height + director_height + EXPANDED_SECTION_GAP + content_height;
    (INFO_BOTTOM_OFFSET + panel + GRADIENT_PADDING).max(DEFAULT_GRADIENT_HEIGHT)
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: f32,
    to: f32,
    // Set on the first frame after the request.
    started: Option<Instant>,
    duration: Duration,
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct DetailPanel {
    state: DetailState,
    content: Option<PanelContent>,
    expanded_height: Option<f32>,
    height: f32,
    opacity: f32,
    gradient_height: f32,
    transition: Option<Transition>,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self {
            state: DetailState::Collapsed,
            content: None,
            expanded_height: None,
            height: 0.0,
            opacity: 0.0,
            gradient_height: DEFAULT_GRADIENT_HEIGHT,
            transition: None,
        }
    }
}

impl DetailPanel {
    pub fn state(&self) -> DetailState {
        self.state
    }

    /// True from the moment an expansion is requested until a collapse is.
    pub fn is_expanded(&self) -> bool {
        matches!(self.state, DetailState::Expanding | DetailState::Expanded)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn content(&self) -> Option<&PanelContent> {
        self.content.as_ref()
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn gradient_height(&self) -> f32 {
        self.gradient_height
    }

    pub fn expanded_height(&self) -> Option<f32> {
        self.expanded_height
    }

    pub fn toggle(&mut self, record: &VideoRecord, metrics: PanelMetrics, duration: Duration) {
        if self.is_expanded() {
            self.collapse(metrics, duration);
        } else {
            self.expand(record, metrics, duration);
        }
    }

    pub fn expand(&mut self, record: &VideoRecord, metrics: PanelMetrics, duration: Duration) {
        if self.is_expanded() {
            return;
        }
        let content = self
            .content
            .get_or_insert_with(|| PanelContent::from_record(record));

        let measured = metrics.content_height(content);
        self.expanded_height = Some(measured);
        self.gradient_height = gradient_height(
            metrics.title_height(&record.title),
            metrics.director_height(&record.director),
            measured,
        );

        self.height = 0.0;
        self.opacity = 0.0;
        self.transition = Some(Transition {
            from: 0.0,
            to: measured,
            started: None,
            duration,
        });
        self.state = DetailState::Expanding;
    }

    pub fn collapse(&mut self, metrics: PanelMetrics, duration: Duration) {
        if !self.is_expanded() {
            return;
        }
        let from = match (self.expanded_height, &self.content) {
            (Some(height), _) => height,
            (None, Some(content)) => metrics.content_height(content),
            (None, None) => self.height,
        };

        self.height = from;
        self.transition = Some(Transition {
            from,
            to: 0.0,
            started: None,
            duration,
        });
        self.gradient_height = DEFAULT_GRADIENT_HEIGHT;
        self.state = DetailState::Collapsing;
    }

    /// Advances the animation. Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        let started = *transition.started.get_or_insert(now);

        let t = if transition.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(started).as_secs_f32();
            (elapsed / transition.duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        let eased = ease_in_out(t);
        let (from, to) = (transition.from, transition.to);
        self.height = from + (to - from) * eased;
        self.opacity = match self.state {
            DetailState::Collapsing => 1.0 - eased,
            _ => eased,
        };

        if t >= 1.0 {
            self.transition = None;
            self.height = to;
            self.state = match self.state {
                DetailState::Expanding => DetailState::Expanded,
                DetailState::Collapsing => DetailState::Collapsed,
                settled => settled,
            };
            self.opacity = if self.state == DetailState::Expanded { 1.0 } else { 0.0 };
            return false;
        }
        true
    }
}
