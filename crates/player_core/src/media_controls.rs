use std::time::Duration;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use souvlaki::{
    MediaControlEvent, MediaControls, MediaMetadata, MediaPlayback, MediaPosition, PlatformConfig,
};

use crate::error::MediaControlsError;
use crate::playback::{PlaybackState, TrackDuration};

/// OS media keys the player responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKeyEvent {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    Stop,
}

impl MediaKeyEvent {
    fn from_control(event: MediaControlEvent) -> Option<Self> {
        match event {
            MediaControlEvent::Play => Some(MediaKeyEvent::Play),
            MediaControlEvent::Pause => Some(MediaKeyEvent::Pause),
            MediaControlEvent::Toggle => Some(MediaKeyEvent::Toggle),
            MediaControlEvent::Next => Some(MediaKeyEvent::Next),
            MediaControlEvent::Previous => Some(MediaKeyEvent::Previous),
            MediaControlEvent::Stop => Some(MediaKeyEvent::Stop),
            _ => None,
        }
    }
}

pub struct MediaControlsHandler {
    controls: MediaControls,
}

impl MediaControlsHandler {
    /// Registers with the OS. Key presses arrive on the returned receiver
    /// from whatever thread the platform uses.
    pub fn new() -> Result<(Self, UnboundedReceiver<MediaKeyEvent>), MediaControlsError> {
        let config = PlatformConfig {
            dbus_name: "music_player",
            display_name: "Music Player",
            hwnd: None,
        };

        let mut controls = MediaControls::new(config)
            .map_err(|e| MediaControlsError::InitFailed(format!("{e:?}")))?;

        let (sender, receiver) = mpsc::unbounded::<MediaKeyEvent>();
        Self::attach_handler(&mut controls, sender)?;

        Ok((Self { controls }, receiver))
    }

    fn attach_handler(
        controls: &mut MediaControls,
        sender: UnboundedSender<MediaKeyEvent>,
    ) -> Result<(), MediaControlsError> {
        controls
            .attach(move |event: MediaControlEvent| {
                if let Some(event) = MediaKeyEvent::from_control(event) {
                    let _ = sender.unbounded_send(event);
                }
            })
            .map_err(|e| MediaControlsError::AttachFailed(format!("{e:?}")))
    }

    /// Publishes the now-playing title and state.
    pub fn publish(
        &mut self,
        title: Option<&str>,
        duration: TrackDuration,
        state: PlaybackState,
        position: Duration,
    ) -> Result<(), MediaControlsError> {
        self.controls
            .set_metadata(MediaMetadata {
                title,
                // Estimated lengths are not published.
                duration: title.and((!duration.is_estimated()).then(|| duration.get())),
                ..Default::default()
            })
            .map_err(|e| MediaControlsError::UpdateFailed(format!("{e:?}")))?;

        let progress = Some(MediaPosition(position));
        let playback = match state {
            PlaybackState::Playing => MediaPlayback::Playing { progress },
            PlaybackState::Paused => MediaPlayback::Paused { progress },
            PlaybackState::Stopped => MediaPlayback::Stopped,
        };
        self.controls
            .set_playback(playback)
            .map_err(|e| MediaControlsError::UpdateFailed(format!("{e:?}")))
    }
}
