//! Time display formatting for hike sessions.

use chrono::{DateTime, Local};

/// Sentinel returned by [`format_duration`] for unparseable input.
pub const INVALID_TIME_FORMAT: &str = "Invalid time format";

/// Format elapsed whole seconds as a zero-padded `HH:MM:SS` string.
///
/// Hours grow without bound (`360000` seconds formats as `100:00:00`).
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Compact a `HH:MM:SS` string for summary display.
///
/// The hour segment is dropped when it is zero: `"00:00:59"` becomes
/// `"00m 59s"`, `"01:01:01"` becomes `"1h 01m 01s"`. Input that is not
/// exactly three colon-separated numeric segments yields
/// [`INVALID_TIME_FORMAT`].
pub fn format_duration(hms: &str) -> String {
    let segments: Vec<&str> = hms.split(':').collect();
    if segments.len() != 3 {
        return INVALID_TIME_FORMAT.to_string();
    }

    let parsed: Vec<u64> = segments
        .iter()
        .filter_map(|segment| segment.parse::<u64>().ok())
        .collect();
    if parsed.len() != 3 {
        return INVALID_TIME_FORMAT.to_string();
    }

    let (hours, minutes, seconds) = (parsed[0], parsed[1], parsed[2]);
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else {
        format!("{:02}m {:02}s", minutes, seconds)
    }
}

/// Format an instant as `HH:mm MMM dd` in the local time zone,
/// e.g. `"17:26 Jun 10"`.
pub fn format_timestamp(instant: DateTime<Local>) -> String {
    instant.format("%H:%M %b %d").to_string()
}
