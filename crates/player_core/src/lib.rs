pub mod audio;
pub mod backend;
pub mod clock;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod media_controls;
pub mod metadata;
pub mod playback;
pub mod playlist;

pub use audio::*;
pub use backend::{
    event_channel, AudioBackend, BackendCapabilities, BackendEvent, BlockingBackend, EventSender,
    Generation, MixerBackend,
};
pub use clock::*;
pub use config::*;
pub use controller::*;
pub use display::*;
pub use error::*;
pub use media_controls::*;
pub use playback::*;
pub use playlist::*;
