use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::audio::AudioFile;
use crate::backend::{AudioBackend, BackendCapabilities, BackendEvent, Generation};
use crate::clock::{Clock, SystemClock};
use crate::display::{progress_ratio, time_label, Display};
use crate::playback::{PlaybackState, TrackDuration, ESTIMATED_TRACK_DURATION};
use crate::playlist::Playlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSettings {
    pub estimated_duration: Duration,
    pub initial_volume: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            estimated_duration: ESTIMATED_TRACK_DURATION,
            initial_volume: 100,
        }
    }
}

/// Result of the play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPause {
    /// Nothing is loaded; the caller should ask for files and then call
    /// [`PlayerController::play_current_track`].
    NeedsTrack,
    Playing,
    Paused,
    /// The track could not be started.
    Stopped,
}

/// Identifies one progress-poll chain. Only the most recently issued token
/// is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Reschedule,
    Finished,
}

/// Owns playback state and turns UI commands into backend calls.
///
/// All methods are expected to run on the UI thread. Background threads only
/// reach the controller through [`PlayerController::handle_backend_event`].
pub struct PlayerController<B, C = SystemClock> {
    backend: B,
    capabilities: BackendCapabilities,
    clock: C,
    rng: SmallRng,
    settings: PlaybackSettings,

    playlist: Playlist,
    state: PlaybackState,
    muted: bool,
    looping: bool,
    shuffle: bool,
    volume: u8,
    last_volume: u8,

    track_duration: TrackDuration,
    started_at: Option<Instant>,
    /// Position accumulated before `started_at`.
    paused_position: Duration,

    generation: Generation,
    next_poll: u64,
    poll: Option<PollToken>,
    display: Display,
}

impl<B: AudioBackend> PlayerController<B> {
    pub fn new(backend: B, settings: PlaybackSettings) -> Self {
        Self::with_clock(backend, SystemClock, settings)
    }
}

impl<B: AudioBackend, C: Clock> PlayerController<B, C> {
    pub fn with_clock(backend: B, clock: C, settings: PlaybackSettings) -> Self {
        let capabilities = backend.capabilities();
        let volume = settings.initial_volume.min(100);

        let mut controller = Self {
            backend,
            capabilities,
            clock,
            rng: SmallRng::from_entropy(),
            settings,
            playlist: Playlist::new(),
            state: PlaybackState::Stopped,
            muted: false,
            looping: false,
            shuffle: false,
            volume,
            last_volume: volume,
            track_duration: TrackDuration::default(),
            started_at: None,
            paused_position: Duration::ZERO,
            generation: Generation::default(),
            next_poll: 0,
            poll: None,
            display: Display::default(),
        };
        controller.apply_volume();
        controller
    }

    /// Replaces the random source, for reproducible shuffle.
    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<&AudioFile> {
        self.playlist.current()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn track_duration(&self) -> TrackDuration {
        self.track_duration
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn poll_token(&self) -> Option<PollToken> {
        self.poll
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Elapsed time in the current track, clamped to its duration.
    pub fn position(&self) -> Duration {
        let position = match self.state {
            PlaybackState::Stopped => Duration::ZERO,
            PlaybackState::Paused => self.paused_position,
            PlaybackState::Playing if self.capabilities.reports_position => {
                self.backend.position().unwrap_or(self.paused_position)
            }
            PlaybackState::Playing => {
                let elapsed = self
                    .started_at
                    .map(|started_at| self.clock.now().saturating_duration_since(started_at))
                    .unwrap_or_default();
                self.paused_position + elapsed
            }
        };
        position.min(self.track_duration.get())
    }

    /// Loads a dialog result. Returns `false`, leaving everything untouched,
    /// when no supported file was selected.
    pub fn select_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> bool {
        let playlist = Playlist::from_paths(paths);
        let Some(first) = playlist.current() else {
            debug!("selection contained no supported files");
            return false;
        };

        info!(tracks = playlist.len(), "playlist loaded");
        self.display.header = first.file_name();
        self.playlist = playlist;
        true
    }

    pub fn play_pause(&mut self) -> PlayPause {
        if self.playlist.current().is_none() {
            return PlayPause::NeedsTrack;
        }

        match self.state {
            PlaybackState::Playing => {
                self.pause();
                PlayPause::Paused
            }
            PlaybackState::Paused if self.capabilities.supports_pause => {
                self.resume();
                PlayPause::Playing
            }
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.play_current_track();
                if self.is_playing() {
                    PlayPause::Playing
                } else {
                    PlayPause::Stopped
                }
            }
        }
    }

    fn pause(&mut self) {
        self.paused_position = self.position();
        self.started_at = None;
        self.poll = None;

        if self.capabilities.supports_pause {
            self.backend.pause();
        } else {
            // Nothing to pause; stop the track and forget its thread.
            self.backend.stop();
            self.generation = self.generation.next();
        }
        self.state = PlaybackState::Paused;
        debug!("paused");
    }

    fn resume(&mut self) {
        self.backend.resume();
        self.started_at = Some(self.clock.now());
        self.state = PlaybackState::Playing;
        self.issue_poll();
        debug!("resumed");
    }

    pub fn stop(&mut self) {
        self.teardown();
        self.state = PlaybackState::Stopped;
        self.display.progress = 0.0;
        self.display.time_label = time_label(Duration::ZERO, self.track_duration.get());
        debug!("stopped");
    }

    pub fn next_track(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        if self.shuffle {
            self.playlist.pick_random(&mut self.rng);
        } else {
            self.playlist.advance();
        }
        self.start_track();
    }

    pub fn prev_track(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        if self.shuffle {
            self.playlist.pick_random(&mut self.rng);
        } else {
            self.playlist.retreat();
        }
        self.start_track();
    }

    /// Starts the current track from the beginning, replacing any playback.
    pub fn play_current_track(&mut self) {
        self.start_track();
    }

    /// On failure the playlist stays on the broken track, so next/prev can
    /// move past it. The duration keeps its previous value.
    fn start_track(&mut self) {
        let Some(file) = self.playlist.current().cloned() else {
            return;
        };

        self.teardown();

        match self.backend.play(&file, self.generation) {
            Ok(reported) => {
                let reported = reported.filter(|_| self.capabilities.reports_duration);
                self.track_duration =
                    TrackDuration::resolve(reported, self.settings.estimated_duration);
                self.started_at = Some(self.clock.now());
                self.state = PlaybackState::Playing;
                self.display.header = file.file_name();
                self.display.progress = 0.0;
                self.display.time_label = time_label(Duration::ZERO, self.track_duration.get());
                self.issue_poll();
                info!(
                    track = %file.file_name(),
                    duration = ?self.track_duration,
                    generation = self.generation.get(),
                    "playing"
                );
            }
            Err(e) => {
                error!(path = %file.path.display(), error = %e, "failed to start playback");
                self.display.header = file.file_name();
                self.state = PlaybackState::Stopped;
                self.display.progress = 0.0;
                self.display.time_label = time_label(Duration::ZERO, self.track_duration.get());
            }
        }
    }

    /// Stops audio, invalidates the running track's events and cancels polling.
    fn teardown(&mut self) {
        self.backend.stop();
        self.generation = self.generation.next();
        self.poll = None;
        self.started_at = None;
        self.paused_position = Duration::ZERO;
    }

    pub fn toggle_loop(&mut self) {
        self.looping = !self.looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if self.muted && self.volume > 0 {
            self.muted = false;
        }
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if self.muted {
            self.last_volume = self.volume;
            self.volume = 0;
        } else {
            self.volume = self.last_volume;
        }
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        if self.capabilities.supports_volume {
            self.backend.set_volume(f32::from(self.volume) / 100.0);
        }
    }

    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        if event.generation() != self.generation || !self.is_playing() {
            debug!(
                event_generation = event.generation().get(),
                current_generation = self.generation.get(),
                "ignoring stale backend event"
            );
            return;
        }

        match event {
            BackendEvent::Finished(_) => self.handle_track_end(),
            BackendEvent::Failed { message, .. } => {
                warn!(%message, "playback failed");
                self.stop();
            }
        }
    }

    /// Advancing skips tracks that fail to start, trying each at most once.
    fn handle_track_end(&mut self) {
        debug!(looping = self.looping, "track ended");
        if self.looping {
            self.play_current_track();
            return;
        }
        for _ in 0..self.playlist.len() {
            self.next_track();
            if self.is_playing() {
                break;
            }
        }
    }

    fn issue_poll(&mut self) {
        self.next_poll += 1;
        self.poll = Some(PollToken(self.next_poll));
    }

    /// Refreshes the progress display. Callers reschedule only on
    /// [`PollStatus::Reschedule`].
    pub fn poll_progress(&mut self, token: PollToken) -> PollStatus {
        if self.poll != Some(token) || !self.is_playing() {
            return PollStatus::Finished;
        }

        let duration = self.track_duration.get();
        if duration.is_zero() {
            self.poll = None;
            return PollStatus::Finished;
        }

        let position = self.position();
        self.display.progress = progress_ratio(position, duration);
        self.display.time_label = time_label(position, duration);
        PollStatus::Reschedule
    }
}
