use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::types::{Point, Size};

use super::defaults::{
    default_conversation_bottom_margin, default_fade_in, default_fade_out,
    default_frame_interval, default_height, default_origin_x, default_origin_y, default_width,
};
use super::env::{env_duration, env_parse};
use super::{
    AnimationSettings, Config, FRAME_INTERVAL_BOUNDS, HumantimeDuration, LayoutSettings,
    MARGIN_BOUNDS, MAX_FADE,
};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("TOASTBAR")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) animation: RawAnimation,
    #[serde(default)]
    pub(super) layout: RawLayout,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawAnimation {
    #[serde(default = "default_fade_in")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) fade_in: Duration,
    #[serde(default = "default_fade_out")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) fade_out: Duration,
    #[serde(default = "default_frame_interval")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) frame_interval: Duration,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawLayout {
    #[serde(default = "default_conversation_bottom_margin")]
    pub(super) conversation_bottom_margin: i32,
    #[serde(default = "default_origin_x")]
    pub(super) origin_x: i32,
    #[serde(default = "default_origin_y")]
    pub(super) origin_y: i32,
    #[serde(default = "default_width")]
    pub(super) width: u32,
    #[serde(default = "default_height")]
    pub(super) height: u32,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(fade_in) = env_duration("TOASTBAR_FADE_IN")? {
            self.animation.fade_in = fade_in;
        }
        if let Some(fade_out) = env_duration("TOASTBAR_FADE_OUT")? {
            self.animation.fade_out = fade_out;
        }
        if let Some(interval) = env_duration("TOASTBAR_FRAME_INTERVAL")? {
            self.animation.frame_interval = interval;
        }
        if let Some(margin) = env_parse::<i32>("TOASTBAR_CONVERSATION_MARGIN")? {
            self.layout.conversation_bottom_margin = margin;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let RawConfig { animation, layout } = self;

        for (field, value) in [
            ("animation.fade_in", animation.fade_in),
            ("animation.fade_out", animation.fade_out),
        ] {
            if value > MAX_FADE {
                return Err(ConfigError::InvalidField {
                    field,
                    message: format!(
                        "expected at most {}, got {}",
                        humantime::format_duration(MAX_FADE),
                        humantime::format_duration(value)
                    ),
                }
                .into());
            }
        }
        if !FRAME_INTERVAL_BOUNDS.contains(&animation.frame_interval) {
            return Err(ConfigError::InvalidField {
                field: "animation.frame_interval",
                message: format!(
                    "expected between {} and {}, got {}",
                    humantime::format_duration(*FRAME_INTERVAL_BOUNDS.start()),
                    humantime::format_duration(*FRAME_INTERVAL_BOUNDS.end()),
                    humantime::format_duration(animation.frame_interval)
                ),
            }
            .into());
        }
        if !MARGIN_BOUNDS.contains(&layout.conversation_bottom_margin) {
            return Err(ConfigError::InvalidField {
                field: "layout.conversation_bottom_margin",
                message: format!(
                    "expected between {} and {}, got {}",
                    MARGIN_BOUNDS.start(),
                    MARGIN_BOUNDS.end(),
                    layout.conversation_bottom_margin
                ),
            }
            .into());
        }
        if layout.width == 0 || layout.height == 0 {
            return Err(ConfigError::InvalidField {
                field: "layout.width",
                message: format!(
                    "bar must have a non-empty area, got {}x{}",
                    layout.width, layout.height
                ),
            }
            .into());
        }

        Ok(Config {
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
        })
    }
}

impl Default for RawAnimation {
    fn default() -> Self {
        Self {
            fade_in: default_fade_in(),
            fade_out: default_fade_out(),
            frame_interval: default_frame_interval(),
        }
    }
}

impl Default for RawLayout {
    fn default() -> Self {
        Self {
            conversation_bottom_margin: default_conversation_bottom_margin(),
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
            width: default_width(),
            height: default_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawConfig;
    use crate::error::{ConfigError, Error};
    use crate::types::{Point, Size};
    use std::time::Duration;

    fn invalid_field(raw: RawConfig) -> &'static str {
        match raw.validate_and_build() {
            Err(Error::Config(ConfigError::InvalidField { field, .. })) => field,
            other => panic!("expected an invalid field, got {other:?}"),
        }
    }

    #[test]
    fn defaults_build() {
        let config = match RawConfig::default().validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("defaults rejected: {err}"),
        };
        assert_eq!(config.animation.fade_in, Duration::from_millis(150));
        assert_eq!(config.animation.frame_interval, Duration::from_millis(16));
        assert_eq!(config.layout.origin, Point::new(0, 1700));
        assert_eq!(config.layout.size, Size::new(1080, 120));
        assert_eq!(config.layout.conversation_bottom_margin, 48);
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        let mut raw = RawConfig::default();
        raw.animation.frame_interval = Duration::ZERO;
        assert_eq!(invalid_field(raw), "animation.frame_interval");
    }

    #[test]
    fn overlong_fade_is_rejected() {
        let mut raw = RawConfig::default();
        raw.animation.fade_out = Duration::from_secs(60);
        assert_eq!(invalid_field(raw), "animation.fade_out");
    }

    #[test]
    fn negative_margin_is_rejected() {
        let mut raw = RawConfig::default();
        raw.layout.conversation_bottom_margin = -1;
        assert_eq!(invalid_field(raw), "layout.conversation_bottom_margin");
    }

    #[test]
    fn empty_bar_is_rejected() {
        let mut raw = RawConfig::default();
        raw.layout.height = 0;
        assert_eq!(invalid_field(raw), "layout.width");
    }
}
