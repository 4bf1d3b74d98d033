//! Host-agnostic UI event types.
//!
//! Every host maps its native input (clicks, wheel, keyboard, resize) to
//! these variants. The page controller never sees raw host input.

use serde::{Deserialize, Serialize};

/// A user-interface event delivered to the page controller.
///
/// The serde form is internally tagged so scripted sessions read naturally:
///
/// ```toml
/// [[step]]
/// event = "wheel"
/// notches = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    /// The burger button that opens and closes the navigation panel.
    PanelButtonClick,
    /// The light/dark switch.
    ThemeButtonClick,
    /// A link was followed. `class` is the clicked element's class
    /// attribute; only links carrying the navigation class close the panel.
    LinkClick {
        href: String,
        #[serde(default)]
        class: String,
    },
    /// Mouse wheel notches; positive scrolls down.
    Wheel { notches: i32 },
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Home,
    End,
    /// Jump to an absolute vertical offset.
    ScrollTo { y: i32 },
    /// The viewport changed size.
    Resize { width: i32, height: i32 },
    /// One rendering frame elapsed (drives smooth scrolling).
    Frame,
}

impl UiEvent {
    /// A click on a link with the given `href` and class attribute.
    pub fn link_click(href: &str, class: &str) -> Self {
        Self::LinkClick {
            href: href.to_string(),
            class: class.to_string(),
        }
    }

    /// Whether this event can move the viewport.
    pub fn moves_viewport(&self) -> bool {
        !matches!(self, Self::PanelButtonClick | Self::ThemeButtonClick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Script {
        step: Vec<UiEvent>,
    }

    #[test]
    fn toggles_do_not_move_viewport() {
        assert!(!UiEvent::PanelButtonClick.moves_viewport());
        assert!(!UiEvent::ThemeButtonClick.moves_viewport());
    }

    #[test]
    fn scrolling_moves_viewport() {
        assert!(UiEvent::Wheel { notches: 1 }.moves_viewport());
        assert!(UiEvent::Frame.moves_viewport());
        assert!(UiEvent::link_click("#work", "navigation__link").moves_viewport());
    }

    #[test]
    fn script_deserializes_from_toml() {
        let src = r##"
            [[step]]
            event = "wheel"
            notches = 3

            [[step]]
            event = "link_click"
            href = "#contact"
            class = "navigation__link"

            [[step]]
            event = "link_click"
            href = "#top"

            [[step]]
            event = "theme_button_click"

            [[step]]
            event = "resize"
            width = 640
            height = 480
        "##;
        let script: Script = toml::from_str(src).unwrap();
        assert_eq!(
            script.step,
            vec![
                UiEvent::Wheel { notches: 3 },
                UiEvent::link_click("#contact", "navigation__link"),
                UiEvent::link_click("#top", ""),
                UiEvent::ThemeButtonClick,
                UiEvent::Resize {
                    width: 640,
                    height: 480
                },
            ]
        );
    }

    #[test]
    fn unknown_event_rejected() {
        let src = r#"
            [[step]]
            event = "double_click"
        "#;
        assert!(toml::from_str::<Script>(src).is_err());
    }
}
