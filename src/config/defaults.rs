use std::time::Duration;

pub(super) const fn default_fade_in() -> Duration {
    Duration::from_millis(150)
}

pub(super) const fn default_fade_out() -> Duration {
    Duration::from_millis(250)
}

pub(super) const fn default_frame_interval() -> Duration {
    Duration::from_millis(16)
}

pub(super) const fn default_conversation_bottom_margin() -> i32 {
    48
}

pub(super) const fn default_origin_x() -> i32 {
    0
}

pub(super) const fn default_origin_y() -> i32 {
    1700
}

pub(super) const fn default_width() -> u32 {
    1080
}

pub(super) const fn default_height() -> u32 {
    120
}
