//! Scripted UI sessions.

use anyhow::{Context, Result};
use serde::Deserialize;

use sectionspy_core::input::UiEvent;

/// The session the driver replays when no script is given.
pub const TOUR: &str = include_str!("../scripts/tour.toml");

fn default_width() -> i32 {
    1280
}

fn default_height() -> i32 {
    800
}

/// A viewport size plus a list of UI events, replayed in order.
#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default = "default_width")]
    pub viewport_width: i32,
    #[serde(default = "default_height")]
    pub viewport_height: i32,
    #[serde(default)]
    pub step: Vec<UiEvent>,
}

impl Script {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("invalid script")
    }

    /// Expand the script so every viewport-moving step is followed by
    /// `frames` animation ticks. Used when smooth scrolling is on.
    pub fn with_settle_frames(mut self, frames: usize) -> Self {
        if frames == 0 {
            return self;
        }
        let mut steps = Vec::with_capacity(self.step.len() * (frames + 1));
        for event in self.step {
            let settle = event.moves_viewport() && event != UiEvent::Frame;
            steps.push(event);
            if settle {
                steps.extend(std::iter::repeat_n(UiEvent::Frame, frames));
            }
        }
        self.step = steps;
        self
    }
}
