//! Region registry: the trackable sections and their indicator links.
//!
//! Built once from the page at startup. Regions are kept in document order;
//! the association to indicators is purely by identifier (`#id` hrefs).

use std::borrow::Borrow;
use std::fmt;

use sectionspy_types::config::SpyConfig;

use crate::indicator::{Indicator, IndicatorSet};
use crate::page::Page;

/// Stable identifier of a trackable region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(String);

impl RegionId {
    /// Wrap an identifier. No validation; an empty id never matches a region.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier without a leading `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The region an `href` refers to: `#id` only. Anything else (external
    /// URLs, bare `#`) binds to no region.
    pub fn from_href(href: &str) -> Option<Self> {
        href.strip_prefix('#')
            .filter(|id| !id.is_empty())
            .map(Self::new)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A trackable content region. Geometry stays with the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    /// Position among the registered regions, in document order.
    pub order: usize,
}

/// What the registry scans for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub section_tag: String,
    pub link_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self::from(&SpyConfig::default())
    }
}

impl From<&SpyConfig> for Selectors {
    fn from(cfg: &SpyConfig) -> Self {
        Self {
            section_tag: cfg.section_tag.to_ascii_lowercase(),
            link_class: cfg.link_class.clone(),
        }
    }
}

/// Regions and indicators found on a page.
#[derive(Debug, Clone)]
pub struct Registry {
    regions: Vec<Region>,
    indicators: IndicatorSet,
}

impl Registry {
    /// Scan `page` in document order. Read-only.
    pub fn build(page: &Page, selectors: &Selectors) -> Self {
        let mut regions: Vec<Region> = Vec::new();
        let mut indicators = Vec::new();

        for node in page.document_order() {
            let Some(el) = page.element(node) else {
                continue;
            };
            if el.tag == selectors.section_tag {
                if let Some(id) = el.id() {
                    if regions.iter().any(|r| r.id.as_str() == id) {
                        log::warn!("Duplicate region id #{id}; keeping the first");
                    } else {
                        regions.push(Region {
                            id: RegionId::new(id),
                            order: regions.len(),
                        });
                    }
                }
            }
            if el.has_class(&selectors.link_class) {
                indicators.push(Indicator::new(el.href().unwrap_or("")));
            }
        }

        log::debug!(
            "Registry: {} regions, {} indicators",
            regions.len(),
            indicators.len()
        );
        Self {
            regions,
            indicators: IndicatorSet::new(indicators),
        }
    }

    /// Tracked regions in document order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Indicator links in document order.
    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    /// Look up a registered region by id.
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id.as_str() == id)
    }

    /// With no regions, or no indicators to reflect them on, the scrollspy
    /// has nothing to do and never starts observing.
    pub fn is_inert(&self) -> bool {
        self.regions.is_empty() || self.indicators.is_empty()
    }

    /// Hand the regions and indicators over to the controller.
    pub fn into_parts(self) -> (Vec<Region>, IndicatorSet) {
        (self.regions, self.indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementSpec, PageSpec};

    fn page(elements: Vec<ElementSpec>) -> Page {
        Page::from_spec(&PageSpec {
            width: 800,
            elements,
        })
        .unwrap()
    }

    #[test]
    fn region_id_from_href() {
        assert_eq!(RegionId::from_href("#work"), Some(RegionId::from("work")));
        assert_eq!(RegionId::from_href("#"), None);
        assert_eq!(RegionId::from_href("work"), None);
        assert_eq!(RegionId::from_href("https://example.com/#work"), None);
    }

    #[test]
    fn finds_sections_in_document_order() {
        let reg = Registry::build(
            &page(vec![
                ElementSpec::new("main")
                    .child(ElementSpec::section("b", 100))
                    .child(ElementSpec::section("a", 100)),
                ElementSpec::section("c", 100),
            ]),
            &Selectors::default(),
        );
        let ids: Vec<&str> = reg.regions().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(reg.regions()[2].order, 2);
    }

    #[test]
    fn sections_without_id_are_skipped() {
        let reg = Registry::build(
            &page(vec![
                ElementSpec::new("section").height(100),
                ElementSpec::section("", 100),
                ElementSpec::section("real", 100),
                ElementSpec::new("div").id("not-a-section").height(100),
            ]),
            &Selectors::default(),
        );
        assert_eq!(reg.regions().len(), 1);
        assert!(reg.region("real").is_some());
        assert!(reg.region("not-a-section").is_none());
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let reg = Registry::build(
            &page(vec![
                ElementSpec::section("dup", 100),
                ElementSpec::section("dup", 200),
            ]),
            &Selectors::default(),
        );
        assert_eq!(reg.regions().len(), 1);
    }

    #[test]
    fn collects_indicators_by_class() {
        let reg = Registry::build(
            &page(vec![
                ElementSpec::new("nav")
                    .child(ElementSpec::link("navigation__link", "#a"))
                    .child(ElementSpec::link("other", "#b"))
                    .child(ElementSpec::link("navigation__link", "/about")),
                ElementSpec::section("a", 100),
            ]),
            &Selectors::default(),
        );
        assert_eq!(reg.indicators().len(), 2);
        assert_eq!(
            reg.indicators().get(0).unwrap().target(),
            Some(&RegionId::from("a"))
        );
        assert_eq!(reg.indicators().get(1).unwrap().target(), None);
    }

    #[test]
    fn empty_page_is_inert() {
        let reg = Registry::build(&page(vec![]), &Selectors::default());
        assert!(reg.is_inert());
    }

    #[test]
    fn sections_without_links_are_inert() {
        let reg = Registry::build(
            &page(vec![ElementSpec::section("a", 100)]),
            &Selectors::default(),
        );
        assert!(reg.is_inert());
        assert_eq!(reg.regions().len(), 1);
    }

    #[test]
    fn custom_selectors() {
        let selectors = Selectors {
            section_tag: "article".into(),
            link_class: "toc".into(),
        };
        let reg = Registry::build(
            &page(vec![
                ElementSpec::link("toc", "#post"),
                ElementSpec::new("article").id("post").height(100),
                ElementSpec::section("ignored", 100),
            ]),
            &selectors,
        );
        assert_eq!(reg.regions().len(), 1);
        assert_eq!(reg.regions()[0].id.as_str(), "post");
        assert!(!reg.is_inert());
    }
}
