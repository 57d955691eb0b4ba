use std::fs::File;
use std::io::BufReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, warn};

use super::{AudioBackend, BackendCapabilities, BackendEvent, EventSender, Generation};
use crate::audio::AudioFile;
use crate::error::BackendError;
use crate::metadata;

/// How often a playing source looks at its stop flag. Audio can outlive a
/// logical stop by up to this long.
const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// How long `play` waits for a still-running previous thread.
const HANDOFF_GRACE: Duration = Duration::from_millis(100);

struct PlaybackThread {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Fire-and-forget playback: each track gets a thread that blocks until the
/// track ends. There is no pause, volume or position; the controller
/// compensates with restarts and a wall clock.
pub struct BlockingBackend {
    events: EventSender,
    current: Option<PlaybackThread>,
}

impl BlockingBackend {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            current: None,
        }
    }
}

fn play_to_end(source: Decoder<BufReader<File>>, stop: &Arc<AtomicBool>) -> Result<(), BackendError> {
    let (_stream, handle) =
        OutputStream::try_default().map_err(|e| BackendError::OutputStream(e.to_string()))?;
    let sink = Sink::try_new(&handle).map_err(|e| BackendError::Sink(e.to_string()))?;

    let stop_flag = Arc::clone(stop);
    let source = source
        .stoppable()
        .periodic_access(STOP_CHECK_INTERVAL, move |source| {
            if stop_flag.load(Ordering::Acquire) {
                source.stop();
            }
        });

    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

fn run(
    source: Decoder<BufReader<File>>,
    stop: Arc<AtomicBool>,
    generation: Generation,
    events: EventSender,
) {
    let result = play_to_end(source, &stop);

    // A stopped thread must never report an ending.
    if stop.load(Ordering::Acquire) {
        debug!(generation = generation.get(), "playback thread stopped early");
        return;
    }

    let event = match result {
        Ok(()) => BackendEvent::Finished(generation),
        Err(e) => {
            warn!(generation = generation.get(), error = %e, "playback thread failed");
            BackendEvent::Failed {
                generation,
                message: e.to_string(),
            }
        }
    };
    let _ = events.unbounded_send(event);
}

impl AudioBackend for BlockingBackend {
    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            supports_pause: false,
            supports_volume: false,
            reports_position: false,
            reports_duration: false,
        }
    }

    fn play(
        &mut self,
        file: &AudioFile,
        generation: Generation,
    ) -> Result<Option<Duration>, BackendError> {
        self.stop();
        if let Some(previous) = self.current.take() {
            if !previous.handle.is_finished() {
                thread::sleep(HANDOFF_GRACE);
            }
        }

        // Decoding up front so unreadable files fail here rather than on the thread.
        let source = metadata::open_decoder(file)?;
        let stop = Arc::new(AtomicBool::new(false));

        let handle = thread::Builder::new().name("playback".into()).spawn({
            let stop = Arc::clone(&stop);
            let events = self.events.clone();
            move || run(source, stop, generation, events)
        })?;

        debug!(path = %file.path.display(), "blocking playback started");
        self.current = Some(PlaybackThread { stop, handle });
        Ok(None)
    }

    fn pause(&mut self) {
        self.stop();
    }

    fn resume(&mut self) {}

    fn stop(&mut self) {
        if let Some(current) = &self.current {
            current.stop.store(true, Ordering::Release);
        }
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn position(&self) -> Option<Duration> {
        None
    }
}

impl Drop for BlockingBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::backend::event_channel;

    /// Silent 16-bit mono PCM, a tenth of a second long.
    fn write_short_wav(path: &Path) {
        let sample_rate: u32 = 8_000;
        let data_len: u32 = sample_rate / 10 * 2;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        fs::write(path, bytes).unwrap();
    }

    fn decoder(dir: &tempfile::TempDir) -> Decoder<BufReader<File>> {
        let path = dir.path().join("tone.wav");
        write_short_wav(&path);
        let file = AudioFile::from_path(path).unwrap();
        metadata::open_decoder(&file).unwrap()
    }

    #[test]
    fn stopped_thread_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (events, mut rx) = event_channel();
        let generation = Generation::default().next();

        run(decoder(&dir), Arc::new(AtomicBool::new(true)), generation, events);

        assert_eq!(rx.try_next().unwrap(), None);
    }

    // Without an output device the thread reports `Failed` instead of `Finished`.
    #[test]
    fn running_thread_reports_its_end_once() {
        let dir = tempfile::tempdir().unwrap();
        let (events, mut rx) = event_channel();
        let generation = Generation::default().next();

        run(decoder(&dir), Arc::new(AtomicBool::new(false)), generation, events);

        let event = rx.try_next().unwrap().unwrap();
        assert_eq!(event.generation(), generation);
        assert!(matches!(
            event,
            BackendEvent::Finished(_) | BackendEvent::Failed { .. }
        ));
        assert_eq!(rx.try_next().unwrap(), None);
    }
}
