//! Text projection of the page state.
//!
//! The driver has no window; each step prints the navigation bar with the
//! class list every link would carry, followed by the toggles and the
//! scroll position.

use sectionspy_core::Site;
use sectionspy_core::input::UiEvent;

/// One line per navigation link plus a status line.
pub fn frame(site: &Site) -> String {
    let config = site.config();
    let indicators = site.spy().indicators();
    let mut out = String::new();

    for (index, indicator) in indicators.iter().enumerate() {
        let marker = if indicator.is_active() { '>' } else { ' ' };
        let classes = indicators
            .class_list(index, &config.link_class, &config.active_class)
            .unwrap_or_default();
        out.push_str(&format!("  {marker} {:<12} class=\"{classes}\"\n", indicator.href()));
    }

    let scroll = site.scroll();
    let panel = site.panel();
    let theme = site.theme();
    out.push_str(&format!(
        "  scroll {}/{} ({:.0}%)  panel aria-expanded={}  theme {} aria-checked={}",
        scroll.offset(),
        scroll.max_scroll(),
        scroll.fraction() * 100.0,
        panel.aria_expanded(),
        theme.theme(),
        theme.aria_checked(),
    ));
    if let Some(class) = theme.root_class() {
        out.push_str(&format!(" <html class=\"{class}\">"));
    }
    out
}

/// Short label for a script step.
pub fn describe(event: &UiEvent) -> String {
    match event {
        UiEvent::PanelButtonClick => "click burger".to_string(),
        UiEvent::ThemeButtonClick => "click theme switch".to_string(),
        UiEvent::LinkClick { href, .. } => format!("follow {href}"),
        UiEvent::Wheel { notches } => format!("wheel {notches:+}"),
        UiEvent::ScrollTo { y } => format!("scroll to {y}"),
        UiEvent::Resize { width, height } => format!("resize {width}x{height}"),
        other => format!("{other:?}"),
    }
}
