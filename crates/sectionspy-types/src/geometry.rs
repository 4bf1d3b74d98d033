//! Document-space geometry: rectangles and the scrolled viewport.
//!
//! All coordinates are integer pixels relative to the top-left corner of the
//! page, with `y` growing downward.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive). Saturates at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive). Saturates at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Area in square pixels. Degenerate rectangles have zero area.
    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlapping region of two rectangles, or `None` if they do not
    /// overlap with positive area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        ))
    }

    /// Grow the rectangle outward by the given edge offsets. Negative values
    /// shrink it. The result never has negative extent; arithmetic saturates.
    pub fn expand(&self, top: i32, right: i32, bottom: i32, left: i32) -> Rect {
        Rect {
            x: self.x.saturating_sub(left),
            y: self.y.saturating_sub(top),
            width: self.width.saturating_add(left).saturating_add(right).max(0),
            height: self.height.saturating_add(top).saturating_add(bottom).max(0),
        }
    }
}

/// The visible window onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            scroll_x: 0,
            scroll_y: 0,
            width,
            height,
        }
    }

    /// Same viewport, scrolled to a new vertical offset.
    pub fn at(self, scroll_y: i32) -> Self {
        Self { scroll_y, ..self }
    }

    /// The viewport as a rectangle in document coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }
}
