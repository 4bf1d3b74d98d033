//! Viewport scroll position over the page.

use sectionspy_types::geometry::{Rect, Viewport};

/// Pixels per arrow-key step.
pub const LINE_PX: i32 = 40;
/// Pixels per mouse wheel notch.
pub const WHEEL_PX: i32 = 100;
/// Page Up/Down moves this fraction of the viewport height.
pub const PAGE_FRACTION: f32 = 0.9;

const MAX_VELOCITY: f32 = 400.0;

/// Velocity multiplier applied each frame while smooth scrolling.
const FRICTION: f32 = 0.8;

/// Below this speed the animation stops.
const VELOCITY_EPSILON: f32 = 0.5;

/// Vertical scroll state of the viewport.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset_y: i32,
    content_height: i32,
    width: i32,
    height: i32,
    /// Pixels per frame; only used when `smooth`.
    velocity: f32,
    smooth: bool,
}

impl ScrollState {
    /// A viewport of `width` x `height` at the top of an empty page.
    pub fn new(width: i32, height: i32, smooth: bool) -> Self {
        Self {
            offset_y: 0,
            content_height: 0,
            width,
            height,
            velocity: 0.0,
            smooth,
        }
    }

    /// The current viewport in document coordinates.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height).at(self.offset_y)
    }

    /// Current vertical scroll offset in pixels.
    pub fn offset(&self) -> i32 {
        self.offset_y
    }

    /// Total height of the scrollable page.
    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    /// Largest valid offset: content height minus viewport height, at least 0.
    pub fn max_scroll(&self) -> i32 {
        (self.content_height - self.height).max(0)
    }

    /// Whether the viewport is at the top of the page.
    pub fn at_top(&self) -> bool {
        self.offset_y == 0
    }

    /// Whether the viewport cannot scroll further down.
    pub fn at_bottom(&self) -> bool {
        self.offset_y >= self.max_scroll()
    }

    /// Position as a fraction of the scrollable range, for a scrollbar.
    pub fn fraction(&self) -> f32 {
        match self.max_scroll() {
            0 => 0.0,
            max => self.offset_y as f32 / max as f32,
        }
    }

    /// Whether a smooth scroll still has velocity left.
    pub fn is_animating(&self) -> bool {
        self.velocity != 0.0
    }

    /// Update the page height, clamping the offset into the new range.
    pub fn set_content_height(&mut self, height: i32) {
        self.content_height = height.max(0);
        self.clamp();
    }

    /// Resize the viewport, clamping the offset into the new range.
    pub fn set_viewport_size(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.clamp();
    }

    /// Scroll down by one line. Returns whether the offset changed.
    pub fn line_down(&mut self) -> bool {
        self.nudge(LINE_PX)
    }

    /// Scroll up by one line. Returns whether the offset changed.
    pub fn line_up(&mut self) -> bool {
        self.nudge(-LINE_PX)
    }

    /// Positive notches scroll down.
    pub fn wheel(&mut self, notches: i32) -> bool {
        self.nudge(notches.saturating_mul(WHEEL_PX))
    }

    /// Scroll down by most of a viewport. Returns whether the offset changed.
    pub fn page_down(&mut self) -> bool {
        self.nudge(self.page_step())
    }

    /// Scroll up by most of a viewport. Returns whether the offset changed.
    pub fn page_up(&mut self) -> bool {
        self.nudge(-self.page_step())
    }

    /// Jump to an absolute offset, cancelling any animation. Returns whether
    /// the offset changed.
    pub fn scroll_to(&mut self, y: i32) -> bool {
        self.velocity = 0.0;
        let before = self.offset_y;
        self.offset_y = y;
        self.clamp();
        self.offset_y != before
    }

    /// Jump to the top of the page.
    pub fn scroll_to_top(&mut self) -> bool {
        self.scroll_to(0)
    }

    /// Jump to the bottom of the page.
    pub fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_to(self.max_scroll())
    }

    /// Align the top of `target` with the top of the viewport, as a fragment
    /// link does.
    pub fn scroll_to_anchor(&mut self, target: Rect) -> bool {
        self.scroll_to(target.y)
    }

    /// Advance smooth scrolling by one frame. Returns whether the offset
    /// changed.
    pub fn tick(&mut self) -> bool {
        if !self.smooth || self.velocity == 0.0 {
            return false;
        }
        let before = self.offset_y;
        self.offset_y += self.velocity.round() as i32;
        self.velocity *= FRICTION;
        self.clamp();

        let pinned = self.offset_y == 0 || self.offset_y == self.max_scroll();
        if pinned || self.velocity.abs() < VELOCITY_EPSILON {
            self.velocity = 0.0;
        }
        self.offset_y != before
    }

    fn page_step(&self) -> i32 {
        (self.height as f32 * PAGE_FRACTION) as i32
    }

    fn nudge(&mut self, delta: i32) -> bool {
        if self.smooth {
            self.velocity = (self.velocity + delta as f32).clamp(-MAX_VELOCITY, MAX_VELOCITY);
            return false;
        }
        let before = self.offset_y;
        self.offset_y = self.offset_y.saturating_add(delta);
        self.clamp();
        self.offset_y != before
    }

    fn clamp(&mut self) {
        self.offset_y = self.offset_y.clamp(0, self.max_scroll());
    }
}
