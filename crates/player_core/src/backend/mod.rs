//! Audio output strategies behind a common trait.
//!
//! Backends never touch player state. Completion and late failures are sent
//! as [`BackendEvent`]s tagged with the [`Generation`] the track was started
//! with, and the receiver decides whether they are still relevant.

use std::time::Duration;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::audio::AudioFile;
use crate::error::BackendError;

mod blocking;
mod mixer;

pub use blocking::BlockingBackend;
pub use mixer::MixerBackend;

/// Identifies one started track. Bumped on every start and stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// Without native pause, pausing stops the track and resuming restarts it.
    pub supports_pause: bool,
    pub supports_volume: bool,
    pub reports_position: bool,
    pub reports_duration: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// The track reached its natural end.
    Finished(Generation),
    /// Playback failed after `play` had already returned.
    Failed {
        generation: Generation,
        message: String,
    },
}

impl BackendEvent {
    pub fn generation(&self) -> Generation {
        match self {
            BackendEvent::Finished(generation) => *generation,
            BackendEvent::Failed { generation, .. } => *generation,
        }
    }
}

pub type EventSender = UnboundedSender<BackendEvent>;

pub fn event_channel() -> (EventSender, UnboundedReceiver<BackendEvent>) {
    mpsc::unbounded()
}

pub trait AudioBackend {
    fn capabilities(&self) -> BackendCapabilities;

    /// Stops whatever is playing and starts `file`. Returns the track length
    /// when the backend can determine it.
    fn play(&mut self, file: &AudioFile, generation: Generation)
        -> Result<Option<Duration>, BackendError>;

    fn pause(&mut self);

    fn resume(&mut self);

    fn stop(&mut self);

    /// `volume` is in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    fn position(&self) -> Option<Duration>;
}

impl<B: AudioBackend + ?Sized> AudioBackend for Box<B> {
    fn capabilities(&self) -> BackendCapabilities {
        (**self).capabilities()
    }

    fn play(
        &mut self,
        file: &AudioFile,
        generation: Generation,
    ) -> Result<Option<Duration>, BackendError> {
        (**self).play(file, generation)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn resume(&mut self) {
        (**self).resume()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn position(&self) -> Option<Duration> {
        (**self).position()
    }
}
