//! Configuration for the page controller and the visibility observer.
//!
//! `SpyConfig` is the user-facing TOML shape. `ObserverConfig` is the
//! validated, parsed form handed to the observer; building it is the only
//! place a hard configuration error can surface.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpyError};
use crate::geometry::Rect;

/// Default fraction that must be visible before a region counts as seen.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Largest accepted margin length in pixels, either sign.
pub const MAX_MARGIN_PX: i32 = 100_000;

/// Largest accepted margin percentage, either sign.
pub const MAX_MARGIN_PERCENT: f64 = 1_000.0;

/// Default `localStorage`-style key for the persisted theme.
pub const DEFAULT_THEME_KEY: &str = "theme";

/// How the visible ratio of a region is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioBasis {
    /// Intersection area over the (margin-adjusted) viewport area. A region
    /// smaller than `threshold` of the viewport can never qualify.
    #[default]
    Viewport,
    /// Intersection area over the region's own area.
    Region,
}

/// A single margin length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(i32),
    /// Percentage of the viewport's extent along the same axis.
    Percent(f64),
}

impl Length {
    fn parse(token: &str) -> Result<Self> {
        let bad = || SpyError::InvalidMargin(token.to_string());
        if token == "0" {
            return Ok(Length::Px(0));
        }
        if let Some(num) = token.strip_suffix("px") {
            let px = num.parse::<i32>().map_err(|_| bad())?;
            if px.unsigned_abs() > MAX_MARGIN_PX.unsigned_abs() {
                return Err(bad());
            }
            return Ok(Length::Px(px));
        }
        if let Some(num) = token.strip_suffix('%') {
            let pct = num.parse::<f64>().map_err(|_| bad())?;
            if !pct.is_finite() || pct.abs() > MAX_MARGIN_PERCENT {
                return Err(bad());
            }
            return Ok(Length::Percent(pct));
        }
        Err(bad())
    }

    /// Resolve to pixels against the extent of the relevant viewport axis.
    pub fn to_px(self, extent: i32) -> i32 {
        match self {
            Length::Px(v) => v,
            Length::Percent(p) => (f64::from(extent) * p / 100.0).round() as i32,
        }
    }
}

/// Offsets applied to the viewport rectangle before intersection, in CSS
/// `margin` shorthand order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Default for ViewportMargin {
    fn default() -> Self {
        Self::uniform(Length::Px(0))
    }
}

impl ViewportMargin {
    pub const fn uniform(len: Length) -> Self {
        Self {
            top: len,
            right: len,
            bottom: len,
            left: len,
        }
    }

    /// Parse a CSS-style shorthand of one to four lengths, e.g. `"0px"`,
    /// `"-10% 0px"`, `"10px 20px 30px 40px"`.
    pub fn parse(src: &str) -> Result<Self> {
        let tokens = src
            .split_whitespace()
            .map(Length::parse)
            .collect::<Result<Vec<_>>>()?;
        match tokens.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [v, h] => Ok(Self {
                top: *v,
                right: *h,
                bottom: *v,
                left: *h,
            }),
            [t, h, b] => Ok(Self {
                top: *t,
                right: *h,
                bottom: *b,
                left: *h,
            }),
            [t, r, b, l] => Ok(Self {
                top: *t,
                right: *r,
                bottom: *b,
                left: *l,
            }),
            _ => Err(SpyError::InvalidMargin(src.to_string())),
        }
    }

    /// Apply the margin to a viewport rectangle.
    pub fn apply(&self, viewport: Rect) -> Rect {
        viewport.expand(
            self.top.to_px(viewport.height),
            self.right.to_px(viewport.width),
            self.bottom.to_px(viewport.height),
            self.left.to_px(viewport.width),
        )
    }
}

/// Validated observer settings. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverConfig {
    threshold: f64,
    margin: ViewportMargin,
    basis: RatioBasis,
}

impl ObserverConfig {
    /// Build a config, failing fast on a threshold outside `[0, 1]`.
    pub fn new(threshold: f64, margin: ViewportMargin, basis: RatioBasis) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SpyError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            margin,
            basis,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn margin(&self) -> ViewportMargin {
        self.margin
    }

    pub fn basis(&self) -> RatioBasis {
        self.basis
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            margin: ViewportMargin::default(),
            basis: RatioBasis::default(),
        }
    }
}

/// Page controller configuration, as read from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpyConfig {
    /// Visible fraction a region must reach to become active.
    pub threshold: f64,
    /// CSS-style margin applied to the viewport before intersection.
    pub root_margin: String,
    pub ratio_basis: RatioBasis,
    /// Tag name of trackable regions.
    pub section_tag: String,
    /// Class carried by navigation indicator links.
    pub link_class: String,
    /// Class added to the active indicator when rendering.
    pub active_class: String,
    /// Storage key for the persisted theme.
    pub theme_key: String,
    pub smooth_scroll: bool,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: "0px".to_string(),
            ratio_basis: RatioBasis::Viewport,
            section_tag: "section".to_string(),
            link_class: "navigation__link".to_string(),
            active_class: "navigation__link--active".to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            smooth_scroll: false,
        }
    }
}

impl SpyConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: SpyConfig = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&src)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.observer_config().map(|_| ())?;
        if self.section_tag.trim().is_empty() {
            return Err(SpyError::Config("section_tag must not be empty".into()));
        }
        if self.link_class.trim().is_empty() {
            return Err(SpyError::Config("link_class must not be empty".into()));
        }
        if self.theme_key.is_empty() {
            return Err(SpyError::Config("theme_key must not be empty".into()));
        }
        Ok(())
    }

    /// The parsed observer settings.
    pub fn observer_config(&self) -> Result<ObserverConfig> {
        let margin = ViewportMargin::parse(&self.root_margin)?;
        ObserverConfig::new(self.threshold, margin, self.ratio_basis)
    }
}
