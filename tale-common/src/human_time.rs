//! Human-readable playback clock formatting
//!
//! Playback positions and durations are shown as `M:SS`: whole minutes
//! without padding, seconds zero-padded to two digits, fractions truncated.

/// Format seconds as a `M:SS` playback clock.
///
/// Non-finite input (NaN, infinities) formats as `0:00`. Negative values
/// are treated as zero since the transport never reports a position before
/// the start of the track.
///
/// # Examples
///
/// ```
/// use tale_common::human_time::format_clock;
///
/// assert_eq!(format_clock(0.0), "0:00");
/// assert_eq!(format_clock(65.9), "1:05");
/// assert_eq!(format_clock(600.0), "10:00");
/// assert_eq!(format_clock(f64::NAN), "0:00");
/// ```
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    let minutes = whole / 60;
    let secs = whole % 60;
    format!("{}:{:02}", minutes, secs)
}
