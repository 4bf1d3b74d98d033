//! Color-scheme preference reported by the environment.

/// Environment variable consulted by [`EnvPreference`].
pub const COLOR_SCHEME_VAR: &str = "SECTIONSPY_COLOR_SCHEME";

/// Abstraction over the host's `prefers-color-scheme` media query.
pub trait ColorSchemePreference {
    /// Whether the environment asks for a dark presentation.
    fn prefers_dark(&self) -> bool;
}

/// A preference fixed at construction time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPreference {
    pub dark: bool,
}

impl FixedPreference {
    pub fn dark() -> Self {
        Self { dark: true }
    }

    pub fn light() -> Self {
        Self { dark: false }
    }
}

impl ColorSchemePreference for FixedPreference {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

/// Reads the preference from [`COLOR_SCHEME_VAR`] once, at construction.
/// Any value other than `dark` (case-insensitive) means light.
#[derive(Debug, Clone, Copy)]
pub struct EnvPreference {
    dark: bool,
}

impl EnvPreference {
    pub fn from_env() -> Self {
        let raw = std::env::var(COLOR_SCHEME_VAR).ok();
        Self::from_value(raw.as_deref())
    }

    fn from_value(raw: Option<&str>) -> Self {
        let dark = raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("dark"));
        Self { dark }
    }
}

impl ColorSchemePreference for EnvPreference {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}
