//! The scrollspy controller.
//!
//! `ScrollSpy` owns everything the section highlighter needs: the registered
//! regions, the indicator set, the observer and the current active region.
//!
//! Lifecycle: [`ScrollSpy::start`] validates configuration, builds the
//! registry and starts observing; [`ScrollSpy::teardown`] stops it. The
//! observer's callback only forwards each batch into a channel. The
//! controller drains that channel after every notification and resolves
//! and applies each batch completely before taking the next, so indicator
//! state is never written reentrantly.

use std::sync::mpsc::{self, Receiver};

use sectionspy_types::config::SpyConfig;
use sectionspy_types::error::Result;
use sectionspy_types::geometry::Viewport;

use crate::indicator::{IndicatorSet, SyncOutcome};
use crate::observer::{GeometrySource, VisibilityEvent, VisibilityObserver};
use crate::page::Page;
use crate::registry::{Region, RegionId, Registry, Selectors};
use crate::resolver::resolve;

/// Highlights the navigation link of the section currently in view.
pub struct ScrollSpy {
    regions: Vec<Region>,
    indicators: IndicatorSet,
    observer: Option<VisibilityObserver>,
    batches: Receiver<Vec<VisibilityEvent>>,
    active: Option<RegionId>,
    batches_handled: u64,
}

impl ScrollSpy {
    /// Validate `config`, scan `page` and start observing.
    ///
    /// Invalid configuration is the only error. A page with no regions (or
    /// no indicators) yields an inert spy that never observes.
    pub fn start(page: &Page, config: &SpyConfig) -> Result<Self> {
        config.validate()?;
        let observer_config = config.observer_config()?;
        let registry = Registry::build(page, &Selectors::from(config));
        let inert = registry.is_inert();
        let (regions, indicators) = registry.into_parts();
        let (tx, rx) = mpsc::channel();

        let observer = if inert {
            log::info!(
                "Scrollspy inert: {} regions, {} indicators",
                regions.len(),
                indicators.len()
            );
            None
        } else {
            Some(VisibilityObserver::observe(
                &regions,
                observer_config,
                move |batch: &[VisibilityEvent]| {
                    // The receiver only disappears with the spy itself.
                    let _ = tx.send(batch.to_vec());
                },
            ))
        };

        Ok(Self {
            regions,
            indicators,
            observer,
            batches: rx,
            active: None,
            batches_handled: 0,
        })
    }

    /// Feed a viewport change through the observer and process every batch
    /// it produced. Returns whether the active region changed.
    pub fn on_viewport_change(&mut self, geometry: &dyn GeometrySource, viewport: Viewport) -> bool {
        let Some(observer) = self.observer.as_mut() else {
            return false;
        };
        observer.notify(geometry, viewport);
        self.drain()
    }

    /// Resolve and apply one batch delivered by an external host.
    pub fn handle_batch(&mut self, events: &[VisibilityEvent]) -> SyncOutcome {
        self.batches_handled += 1;
        let next = resolve(events, self.active.as_ref());
        if next == self.active {
            return SyncOutcome::Unchanged;
        }
        let outcome = self.indicators.apply(next.as_ref());
        if let Some(region) = &next {
            log::info!(
                "Active section: {} -> {region}",
                self.active
                    .as_ref()
                    .map_or_else(|| "(none)".to_string(), RegionId::to_string)
            );
        }
        self.active = next;
        outcome
    }

    fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(batch) = self.batches.try_recv() {
            changed |= self.handle_batch(&batch) != SyncOutcome::Unchanged;
        }
        changed
    }

    /// Stop observing. Pending batches are discarded. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.disconnect();
        }
        while self.batches.try_recv().is_ok() {}
    }

    /// The region whose indicator is active, if any has qualified yet.
    pub fn active(&self) -> Option<&RegionId> {
        self.active.as_ref()
    }

    /// The navigation indicators in document order.
    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    /// Tracked regions in document order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// No regions or no indicators: nothing is observed.
    pub fn is_inert(&self) -> bool {
        self.observer.is_none()
    }

    /// Observing and not yet torn down.
    pub fn is_running(&self) -> bool {
        self.observer.as_ref().is_some_and(VisibilityObserver::is_connected)
    }

    /// Number of batches resolved since start, including no-op ones.
    pub fn batches_handled(&self) -> u64 {
        self.batches_handled
    }

    /// The registered region a link points at.
    pub fn target_of(&self, href: &str) -> Option<&Region> {
        let id = RegionId::from_href(href)?;
        self.regions.iter().find(|r| r.id == id)
    }
}

impl Drop for ScrollSpy {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ScrollSpy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("regions", &self.regions.len())
            .field("active", &self.active)
            .field("running", &self.is_running())
            .finish()
    }
}
