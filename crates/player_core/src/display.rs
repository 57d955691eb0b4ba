use std::time::Duration;

pub const NO_TRACK_HEADER: &str = "Select a track";

/// Formats whole seconds as `M:SS`; minutes are not padded.
pub fn format_time(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn time_label(position: Duration, duration: Duration) -> String {
    format!("{} / {}", format_time(position), format_time(duration))
}

pub fn progress_ratio(position: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 0.0;
    }
    (position.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Text and progress values the window renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    pub header: String,
    pub time_label: String,
    pub progress: f32,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            header: NO_TRACK_HEADER.to_string(),
            time_label: time_label(Duration::ZERO, Duration::ZERO),
            progress: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(Duration::from_secs(75)), "1:15");
        assert_eq!(format_time(Duration::from_secs(5)), "0:05");
        assert_eq!(format_time(Duration::ZERO), "0:00");
        assert_eq!(format_time(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_time(Duration::from_millis(59_999)), "0:59");
    }

    #[test]
    fn progress_is_clamped() {
        let duration = Duration::from_secs(180);
        assert_eq!(progress_ratio(Duration::from_secs(90), duration), 0.5);
        assert_eq!(progress_ratio(Duration::from_secs(400), duration), 1.0);
        assert_eq!(progress_ratio(Duration::from_secs(10), Duration::ZERO), 0.0);
    }

    #[test]
    fn default_display_shows_zero_time() {
        let display = Display::default();
        assert_eq!(display.time_label, "0:00 / 0:00");
        assert_eq!(display.header, NO_TRACK_HEADER);
    }
}
