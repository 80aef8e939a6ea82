use chrono::{Local, TimeZone, Utc};

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as local wall-clock time `HH:MM:SS`.
///
/// Out-of-range values fall back to `00:00:00`.
pub fn timestamp_to_clock_time(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "00:00:00".to_string(),
    }
}
