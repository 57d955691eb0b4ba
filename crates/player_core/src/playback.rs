use std::time::Duration;

/// Used when the backend cannot report a track's length.
pub const ESTIMATED_TRACK_DURATION: Duration = Duration::from_secs(180);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Length of the loaded track and whether it can be trusted.
///
/// An `Estimated` duration makes the progress bar an approximation: the
/// wall-clock position is clamped to it and the track may end before or after
/// the bar fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDuration {
    Exact(Duration),
    Estimated(Duration),
}

impl TrackDuration {
    pub fn resolve(reported: Option<Duration>, estimate: Duration) -> Self {
        match reported {
            Some(duration) => TrackDuration::Exact(duration),
            None => TrackDuration::Estimated(estimate),
        }
    }

    pub fn get(&self) -> Duration {
        match self {
            TrackDuration::Exact(duration) | TrackDuration::Estimated(duration) => *duration,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, TrackDuration::Estimated(_))
    }
}

impl Default for TrackDuration {
    fn default() -> Self {
        TrackDuration::Exact(Duration::ZERO)
    }
}
