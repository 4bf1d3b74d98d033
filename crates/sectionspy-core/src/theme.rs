//! Light/dark presentation toggle with persisted choice.
//!
//! On startup the stored value under the theme key decides. When nothing is
//! stored the environment's color-scheme preference decides. Every toggle
//! writes the new choice back. A stored value other than `dark` reads as
//! light.

use std::fmt;

use sectionspy_platform::{ColorSchemePreference, KeyValueStore};

/// Class set on the document root while dark.
pub const DARK_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored value.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme switch and the store it persists to.
pub struct ThemeToggle {
    theme: Theme,
    key: String,
    store: Box<dyn KeyValueStore>,
}

impl ThemeToggle {
    /// Determine the initial theme. Storage failures fall back to the
    /// environment preference.
    pub fn init(
        store: Box<dyn KeyValueStore>,
        preference: &dyn ColorSchemePreference,
        key: &str,
    ) -> Self {
        let stored = match store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                log::warn!("Cannot read theme from storage: {e}");
                None
            },
        };
        let theme = match stored {
            Some(value) => Theme::from_stored(&value),
            None if preference.prefers_dark() => Theme::Dark,
            None => Theme::Light,
        };
        log::info!("Initial theme: {theme}");
        Self {
            theme,
            key: key.to_string(),
            store,
        }
    }

    /// Flip and persist. The in-memory theme changes even if the write
    /// fails.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        if let Err(e) = self.store.set(&self.key, self.theme.as_str()) {
            log::warn!("Cannot persist theme {}: {e}", self.theme);
        }
        log::debug!("Theme switched to {}", self.theme);
        self.theme
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Value of the switch's `aria-checked` attribute.
    pub fn aria_checked(&self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }

    /// Class to put on the document root, if any.
    pub fn root_class(&self) -> Option<&'static str> {
        self.is_dark().then_some(DARK_CLASS)
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

impl fmt::Debug for ThemeToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeToggle")
            .field("theme", &self.theme)
            .field("key", &self.key)
            .finish()
    }
}
