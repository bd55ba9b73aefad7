use chrono::{NaiveTime, Timelike};

use crate::types::{PrayerEvent, TimeFormat};

/// Rendered in place of a time when the event does not occur.
pub const INVALID_TIME: &str = "invalid";

/// Splits fractional hours in [0, 24) into whole hours and the nearest
/// minute. A remainder that rounds up to 60 carries into the next hour,
/// wrapping at midnight.
pub fn split_hours(hours: f64) -> (u32, u32) {
    debug_assert!((0.0..24.0).contains(&hours), "hours out of range: {}", hours);
    let whole = hours.trunc();
    let mut h = whole as u32 % 24;
    let mut m = ((hours - whole) * 60.0).round() as u32;
    if m >= 60 {
        h = (h + 1) % 24;
        m = 0;
    }
    (h, m)
}

pub fn time_to_hours(time: (u32, u32)) -> f64 {
    time.0 as f64 + time.1 as f64 / 60.0
}

pub fn format_hours(hours: f64, format: TimeFormat) -> String {
    if !(0.0..24.0).contains(&hours) {
        return INVALID_TIME.to_string();
    }
    let (h, m) = split_hours(hours);
    let Some(time) = NaiveTime::from_hms_opt(h, m, 0) else {
        return INVALID_TIME.to_string();
    };
    match format {
        TimeFormat::H24 => time.format("%H:%M").to_string(),
        TimeFormat::H12 => time.format("%I:%M %p").to_string(),
    }
}

pub fn format_event(event: PrayerEvent, format: TimeFormat) -> String {
    match event {
        PrayerEvent::Time(hours) => format_hours(hours, format),
        PrayerEvent::NoEvent => INVALID_TIME.to_string(),
    }
}

/// Parses an `HH:MM` string produced by [`format_hours`] with
/// [`TimeFormat::H24`].
pub fn parse_time_24(s: &str) -> Option<(u32, u32)> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .ok()
        .map(|t| (t.hour(), t.minute()))
}
