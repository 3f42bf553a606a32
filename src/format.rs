//! Display formatting for playback time and volume.

use std::time::Duration;

/// Format an optional duration as `m:ss` for the transport bar.
///
/// Unknown durations render as `-:--`, the same placeholder the track
/// list uses for songs without a known length. Whole seconds only:
/// partial seconds are floored, minutes are not zero-padded and do not
/// roll over into hours.
pub fn format_time(t: Option<Duration>) -> String {
    let Some(t) = t else {
        return "-:--".to_string();
    };

    let secs = t.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Volume ratio (0.0..=1.0) as a whole percentage for display.
pub fn volume_percent(ratio: f32) -> u16 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u16
}
