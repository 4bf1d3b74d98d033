//! Visibility observer: threshold-crossing notifications for watched regions.
//!
//! The observer keeps, per watched region, which side of the threshold the
//! region was on at the last notification. `notify` recomputes every ratio
//! against the current viewport and delivers one batch containing an event
//! for each region whose side changed. A freshly watched region has no side
//! yet, so its first computation always reports.

use sectionspy_types::config::{ObserverConfig, RatioBasis};
use sectionspy_types::geometry::{Rect, Viewport};

use crate::registry::{Region, RegionId};

/// One threshold crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEvent {
    pub region: RegionId,
    /// `true` when the region is now at or above the threshold.
    pub is_visible: bool,
    pub visible_ratio: f64,
}

impl VisibilityEvent {
    pub fn new(region: impl Into<RegionId>, is_visible: bool, visible_ratio: f64) -> Self {
        Self {
            region: region.into(),
            is_visible,
            visible_ratio,
        }
    }
}

/// Host-side geometry lookup. `None` means the region is gone.
pub trait GeometrySource {
    fn bounds_of(&self, region: &RegionId) -> Option<Rect>;
}

/// Receives coalesced batches. Never called with an empty batch.
pub type BatchCallback = Box<dyn FnMut(&[VisibilityEvent])>;

#[derive(Debug)]
struct Watch {
    region: RegionId,
    last_visible: Option<bool>,
}

/// Visible fraction of `bounds` inside `root` under the given basis.
pub fn visible_ratio(bounds: &Rect, root: &Rect, basis: RatioBasis) -> f64 {
    let Some(overlap) = bounds.intersection(root) else {
        return 0.0;
    };
    let denom = match basis {
        RatioBasis::Viewport => root.area(),
        RatioBasis::Region => bounds.area(),
    };
    if denom == 0 {
        return 0.0;
    }
    (overlap.area() as f64 / denom as f64).min(1.0)
}

/// Threshold test. A zero threshold still needs some overlap.
pub fn meets_threshold(ratio: f64, threshold: f64) -> bool {
    if threshold == 0.0 {
        ratio > 0.0
    } else {
        ratio >= threshold
    }
}

/// Watches regions against the viewport and reports threshold crossings.
pub struct VisibilityObserver {
    config: ObserverConfig,
    watches: Vec<Watch>,
    on_batch: Option<BatchCallback>,
}

impl VisibilityObserver {
    /// Start watching every region in `regions`. An empty slice is allowed
    /// and yields an observer that never reports.
    pub fn observe<F>(regions: &[Region], config: ObserverConfig, on_batch: F) -> Self
    where
        F: FnMut(&[VisibilityEvent]) + 'static,
    {
        let mut observer = Self {
            config,
            watches: Vec::with_capacity(regions.len()),
            on_batch: Some(Box::new(on_batch)),
        };
        for region in regions {
            observer.watch(&region.id);
        }
        log::info!(
            "Observing {} regions (threshold {}, basis {:?})",
            observer.watches.len(),
            config.threshold(),
            config.basis()
        );
        observer
    }

    /// Add one region. Watching an already watched region, or watching
    /// after [`disconnect`](Self::disconnect), does nothing.
    pub fn watch(&mut self, region: &RegionId) {
        if self.on_batch.is_none() || self.watches.iter().any(|w| &w.region == region) {
            return;
        }
        self.watches.push(Watch {
            region: region.clone(),
            last_visible: None,
        });
    }

    /// Stop watching one region. Returns whether it was watched.
    pub fn unobserve(&mut self, region: &RegionId) -> bool {
        let before = self.watches.len();
        self.watches.retain(|w| &w.region != region);
        self.watches.len() != before
    }

    /// Release every watch and the callback. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        if self.on_batch.take().is_some() {
            log::info!("Observer disconnected ({} watches released)", self.watches.len());
        }
        self.watches.clear();
    }

    pub fn is_connected(&self) -> bool {
        self.on_batch.is_some()
    }

    pub fn watched(&self) -> impl Iterator<Item = &RegionId> {
        self.watches.iter().map(|w| &w.region)
    }

    pub fn watched_count(&self) -> usize {
        self.watches.len()
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Recompute visibility against `viewport` and deliver the resulting
    /// batch, if any. Returns the number of events delivered.
    ///
    /// Regions that `geometry` no longer knows about are dropped from the
    /// watch list without reporting.
    pub fn notify(&mut self, geometry: &dyn GeometrySource, viewport: Viewport) -> usize {
        let Some(on_batch) = self.on_batch.as_mut() else {
            return 0;
        };

        let root = self.config.margin().apply(viewport.rect());
        let threshold = self.config.threshold();
        let basis = self.config.basis();
        let mut batch = Vec::new();

        self.watches.retain_mut(|watch| {
            let Some(bounds) = geometry.bounds_of(&watch.region) else {
                log::debug!("Region #{} left the page; no longer watched", watch.region);
                return false;
            };
            let ratio = visible_ratio(&bounds, &root, basis);
            let visible = meets_threshold(ratio, threshold);
            if watch.last_visible != Some(visible) {
                watch.last_visible = Some(visible);
                batch.push(VisibilityEvent {
                    region: watch.region.clone(),
                    is_visible: visible,
                    visible_ratio: ratio,
                });
            }
            true
        });

        if batch.is_empty() {
            return 0;
        }
        log::debug!(
            "Visibility batch at y={}: {}",
            viewport.scroll_y,
            batch
                .iter()
                .map(|e| format!("{}{}", if e.is_visible { '+' } else { '-' }, e.region))
                .collect::<Vec<_>>()
                .join(" ")
        );
        on_batch(&batch);
        batch.len()
    }
}

impl std::fmt::Debug for VisibilityObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityObserver")
            .field("config", &self.config)
            .field("watches", &self.watches)
            .field("connected", &self.is_connected())
            .finish()
    }
}
