//! Collapsible navigation panel driven by the burger button.

/// Open/closed state of the navigation panel and its toggle button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavPanel {
    open: bool,
}

impl NavPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the panel. Returns the new state.
    pub fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        log::debug!("Navigation panel {}", if self.open { "opened" } else { "closed" });
        self.open
    }

    /// Close the panel if it is open. Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        log::debug!("Navigation panel closed");
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The burger button animates into a close glyph while open.
    pub fn button_active(&self) -> bool {
        self.open
    }

    /// Value of the button's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
