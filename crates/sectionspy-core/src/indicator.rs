//! Indicator set and the synchronizer that writes it.
//!
//! `IndicatorSet::apply` is the only writer of the active flags. At most
//! one indicator is active after any call.

use crate::registry::RegionId;

/// A navigation label bound to a region through its `href`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    href: String,
    target: Option<RegionId>,
    active: bool,
}

impl Indicator {
    pub fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
            target: RegionId::from_href(href),
            active: false,
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// The region this label points at, if its href is `#id`.
    pub fn target(&self) -> Option<&RegionId> {
        self.target.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Result of one synchronizer pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to apply; flags kept their previous values.
    Unchanged,
    /// Flags were reset and the indicator at `index` is now active.
    Activated { index: usize, region: RegionId },
    /// Flags were reset but no indicator targets the region.
    Orphaned(RegionId),
}

/// All indicators on the page, in document order.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    items: Vec<Indicator>,
    orphaned: u64,
}

impl IndicatorSet {
    pub fn new(items: Vec<Indicator>) -> Self {
        Self { items, orphaned: 0 }
    }

    pub fn from_hrefs<'a>(hrefs: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(hrefs.into_iter().map(Indicator::new).collect())
    }

    /// Reflect `new_active` onto the set.
    ///
    /// `None` leaves every flag as it was. `Some(id)` clears all flags and
    /// then sets the first indicator targeting `id`. A region with no
    /// indicator leaves everything cleared and is reported as
    /// [`SyncOutcome::Orphaned`].
    pub fn apply(&mut self, new_active: Option<&RegionId>) -> SyncOutcome {
        let Some(region) = new_active else {
            return SyncOutcome::Unchanged;
        };

        for item in &mut self.items {
            item.active = false;
        }

        match self
            .items
            .iter()
            .position(|i| i.target.as_ref() == Some(region))
        {
            Some(index) => {
                self.items[index].active = true;
                log::debug!("Indicator {} active for #{region}", self.items[index].href);
                SyncOutcome::Activated {
                    index,
                    region: region.clone(),
                }
            },
            None => {
                self.orphaned += 1;
                log::warn!("No indicator links to #{region}; all indicators cleared");
                SyncOutcome::Orphaned(region.clone())
            },
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Indicator> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.items.iter()
    }

    pub fn find_by_href(&self, href: &str) -> Option<&Indicator> {
        self.items.iter().find(|i| i.href == href)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.items.iter().position(|i| i.active)
    }

    pub fn active(&self) -> Option<&Indicator> {
        self.items.iter().find(|i| i.active)
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|i| i.active).count()
    }

    /// How many times a region was applied that no indicator targets.
    pub fn orphaned_count(&self) -> u64 {
        self.orphaned
    }

    /// Rendered class attribute for the indicator at `index`.
    pub fn class_list(&self, index: usize, link_class: &str, active_class: &str) -> Option<String> {
        let item = self.items.get(index)?;
        Some(if item.active {
            format!("{link_class} {active_class}")
        } else {
            link_class.to_string()
        })
    }
}
