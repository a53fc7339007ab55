use std::time::Duration;

use humantime::{format_duration, parse_duration};
use serde::Deserialize;
use serde_with::{DeserializeAs, SerializeAs};

/// Adaptateur `serde_with` pour les durées écrites `"150ms"`, `"2s"`, ...
pub struct HumantimeDuration;

impl<'de> DeserializeAs<'de, Duration> for HumantimeDuration {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_duration(raw.trim()).map_err(serde::de::Error::custom)
    }
}

impl SerializeAs<Duration> for HumantimeDuration {
    fn serialize_as<S>(value: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format_duration(*value).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::HumantimeDuration;
    use serde::{Deserialize, Serialize};
    use serde_with::serde_as;
    use std::time::Duration;

    #[serde_as]
    #[derive(Deserialize, Serialize)]
    struct Frame {
        #[serde_as(as = "HumantimeDuration")]
        interval: Duration,
    }

    #[test]
    fn parses_millisecond_strings() {
        let frame: Frame = match serde_json::from_str(r#"{"interval":" 16ms "}"#) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse frame json: {err}"),
        };
        assert_eq!(frame.interval, Duration::from_millis(16));
    }

    #[test]
    fn writes_human_readable_strings() {
        let frame = Frame {
            interval: Duration::from_millis(250),
        };
        let json = match serde_json::to_string(&frame) {
            Ok(value) => value,
            Err(err) => panic!("failed to write frame json: {err}"),
        };
        assert_eq!(json, r#"{"interval":"250ms"}"#);
    }

    #[test]
    fn rejects_bare_numbers_as_strings() {
        assert!(serde_json::from_str::<Frame>(r#"{"interval":"16"}"#).is_err());
    }
}
