pub mod bias;
pub mod doctor;
pub mod history;
pub mod recall;
pub mod send;
pub mod words;

use zidek::config::ZidekConfig;

/// `room` if given, else the configured default room.
pub(crate) fn room_or_default<'a>(config: &'a ZidekConfig, room: Option<&'a str>) -> &'a str {
    room.unwrap_or(&config.storage.default_room)
}
