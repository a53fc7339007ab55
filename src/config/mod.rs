use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::animation::FadeTimeline;
use crate::error::Error as ToastError;
use crate::headless::{HeadlessView, StaticResources};
use crate::types::{Point, Size};

mod defaults;
mod duration;
mod env;
mod raw;

pub use duration::HumantimeDuration;

const MAX_FADE: Duration = Duration::from_secs(10);
const FRAME_INTERVAL_BOUNDS: RangeInclusive<Duration> =
    Duration::from_millis(1)..=Duration::from_secs(1);
const MARGIN_BOUNDS: RangeInclusive<i32> = 0..=1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub animation: AnimationSettings,
    pub layout: LayoutSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSettings {
    pub fade_in: Duration,
    pub fade_out: Duration,
    /// Période de tick de la boucle qui fait avancer la timeline.
    pub frame_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    pub conversation_bottom_margin: i32,
    pub origin: Point,
    pub size: Size,
}

impl Config {
    /// Load configuration from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }
}

impl Default for Config {
    fn default() -> Self {
        let layout = raw::RawLayout::default();
        let animation = raw::RawAnimation::default();
        Self {
            animation: AnimationSettings {
                fade_in: animation.fade_in,
                fade_out: animation.fade_out,
                frame_interval: animation.frame_interval,
            },
            layout: LayoutSettings {
                conversation_bottom_margin: layout.conversation_bottom_margin,
                origin: Point::new(layout.origin_x, layout.origin_y),
                size: Size::new(layout.width, layout.height),
            },
        }
    }
}

impl AnimationSettings {
    #[must_use]
    pub fn timeline(&self) -> FadeTimeline {
        FadeTimeline::new(self.fade_in, self.fade_out)
    }

    /// Nombre de frames pour jouer entièrement le plus long des deux fondus.
    #[must_use]
    pub fn frames_to_settle(&self) -> u32 {
        let longest = self.fade_in.max(self.fade_out);
        let frames = longest.as_nanos().div_ceil(self.frame_interval.as_nanos().max(1));
        u32::try_from(frames).unwrap_or(u32::MAX)
    }
}

impl LayoutSettings {
    #[must_use]
    pub const fn view(&self) -> HeadlessView {
        HeadlessView::new(self.origin, self.size)
    }

    #[must_use]
    pub const fn resources(&self) -> StaticResources {
        StaticResources::new(self.conversation_bottom_margin)
    }
}
