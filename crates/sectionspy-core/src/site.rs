//! Page-level controller: routes UI events to the panel, the theme switch,
//! the scroll position and the scrollspy.
//!
//! The three pieces of state are independent. The only coupling is that
//! following a navigation link closes the panel and moves the viewport,
//! which the scrollspy then observes like any other scroll.

use sectionspy_platform::{ColorSchemePreference, KeyValueStore};
use sectionspy_types::config::SpyConfig;
use sectionspy_types::error::Result;
use sectionspy_types::input::UiEvent;

use crate::observer::GeometrySource;
use crate::page::Page;
use crate::panel::NavPanel;
use crate::scroll::ScrollState;
use crate::spy::ScrollSpy;
use crate::theme::ThemeToggle;

pub struct Site {
    page: Page,
    config: SpyConfig,
    scroll: ScrollState,
    spy: ScrollSpy,
    panel: NavPanel,
    theme: ThemeToggle,
}

impl Site {
    /// Wire up a page. The scrollspy gets its initial notification for the
    /// starting viewport before this returns.
    pub fn new(
        page: Page,
        config: SpyConfig,
        store: Box<dyn KeyValueStore>,
        preference: &dyn ColorSchemePreference,
        viewport_width: i32,
        viewport_height: i32,
    ) -> Result<Self> {
        let spy = ScrollSpy::start(&page, &config)?;
        let mut scroll = ScrollState::new(viewport_width, viewport_height, config.smooth_scroll);
        scroll.set_content_height(page.content_height());
        let theme = ThemeToggle::init(store, preference, &config.theme_key);

        let mut site = Self {
            page,
            config,
            scroll,
            spy,
            panel: NavPanel::new(),
            theme,
        };
        site.refresh();
        Ok(site)
    }

    /// Apply one UI event. Returns whether the active section changed.
    pub fn handle(&mut self, event: &UiEvent) -> bool {
        let moved = match event {
            UiEvent::PanelButtonClick => {
                self.panel.toggle_open();
                false
            },
            UiEvent::ThemeButtonClick => {
                self.theme.toggle();
                false
            },
            UiEvent::LinkClick { href, class } => self.follow_link(href, class),
            UiEvent::Wheel { notches } => self.scroll.wheel(*notches),
            UiEvent::LineDown => self.scroll.line_down(),
            UiEvent::LineUp => self.scroll.line_up(),
            UiEvent::PageDown => self.scroll.page_down(),
            UiEvent::PageUp => self.scroll.page_up(),
            UiEvent::Home => self.scroll.scroll_to_top(),
            UiEvent::End => self.scroll.scroll_to_bottom(),
            UiEvent::ScrollTo { y } => self.scroll.scroll_to(*y),
            UiEvent::Resize { width, height } => {
                self.scroll.set_viewport_size(*width, *height);
                true
            },
            UiEvent::Frame => self.scroll.tick(),
        };
        moved && self.refresh()
    }

    /// A link carrying the navigation class closes the panel. Any `#id` link
    /// to a known region scrolls it to the top of the viewport.
    fn follow_link(&mut self, href: &str, class: &str) -> bool {
        if class.split_whitespace().any(|c| c == self.config.link_class) {
            self.panel.close();
        }
        let target = self
            .spy
            .target_of(href)
            .and_then(|region| self.page.bounds_of(&region.id));
        match target {
            Some(bounds) => self.scroll.scroll_to_anchor(bounds),
            None => {
                log::debug!("Link {href} has no on-page target");
                false
            },
        }
    }

    /// Detach a region from the page and re-check visibility.
    pub fn remove_element(&mut self, id: &str) -> bool {
        if !self.page.remove_by_id(id) {
            return false;
        }
        self.refresh();
        true
    }

    fn refresh(&mut self) -> bool {
        self.spy.on_viewport_change(&self.page, self.scroll.viewport())
    }

    /// Stop the scrollspy. Toggles keep working.
    pub fn teardown(&mut self) {
        self.spy.teardown();
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn spy(&self) -> &ScrollSpy {
        &self.spy
    }

    pub fn panel(&self) -> &NavPanel {
        &self.panel
    }

    pub fn theme(&self) -> &ThemeToggle {
        &self.theme
    }
}
