//! sectionspy core.
//!
//! Viewport-driven section highlighting for a single page: a region
//! registry, a visibility observer, the active-region resolver and the
//! indicator synchronizer, tied together by [`ScrollSpy`]. The page model,
//! scroll state and the panel/theme switches that share the page live here
//! too, and [`Site`] routes UI events to all of them.

// Re-exports from sectionspy-types.
pub use sectionspy_types::config;
pub use sectionspy_types::error;
pub use sectionspy_types::geometry;
pub use sectionspy_types::input;

pub mod indicator;
pub mod observer;
pub mod page;
pub mod panel;
pub mod registry;
pub mod resolver;
pub mod scroll;
pub mod site;
pub mod spy;
pub mod theme;

pub use indicator::{Indicator, IndicatorSet, SyncOutcome};
pub use observer::{GeometrySource, VisibilityEvent, VisibilityObserver};
pub use page::{ElementSpec, Page, PageSpec};
pub use panel::NavPanel;
pub use registry::{Region, RegionId, Registry, Selectors};
pub use resolver::resolve;
pub use scroll::ScrollState;
pub use site::Site;
pub use spy::ScrollSpy;
pub use theme::{Theme, ThemeToggle};
