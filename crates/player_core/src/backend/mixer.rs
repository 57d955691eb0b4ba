use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, trace};

use super::{AudioBackend, BackendCapabilities, BackendEvent, EventSender, Generation};
use crate::audio::AudioFile;
use crate::error::BackendError;
use crate::metadata;

const WATCH_INTERVAL: Duration = Duration::from_millis(100);

/// Plays through a rodio [`Sink`], with native pause, volume and position.
pub struct MixerBackend {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Arc<Sink>>,
    volume: f32,
    /// Generation the running watcher belongs to; 0 when idle.
    active: Arc<AtomicU64>,
    events: EventSender,
}

impl MixerBackend {
    pub fn new(events: EventSender) -> Result<Self, BackendError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| BackendError::OutputStream(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            volume: 1.0,
            active: Arc::new(AtomicU64::new(0)),
            events,
        })
    }

    fn spawn_watcher(&self, sink: Arc<Sink>, generation: Generation) -> Result<(), BackendError> {
        let active = Arc::clone(&self.active);
        let events = self.events.clone();

        thread::Builder::new()
            .name("playback-watcher".into())
            .spawn(move || watch(|| sink.empty(), &active, generation, &events))?;

        Ok(())
    }
}

/// Polls until the sink drains, then reports the natural end once. Returns
/// silently as soon as another generation becomes active.
fn watch(
    drained: impl Fn() -> bool,
    active: &AtomicU64,
    generation: Generation,
    events: &EventSender,
) {
    loop {
        thread::sleep(WATCH_INTERVAL);
        if active.load(Ordering::Acquire) != generation.get() {
            trace!(generation = generation.get(), "watcher superseded");
            return;
        }
        if drained() {
            let _ = events.unbounded_send(BackendEvent::Finished(generation));
            return;
        }
    }
}

impl AudioBackend for MixerBackend {
    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            supports_pause: true,
            supports_volume: true,
            reports_position: true,
            reports_duration: true,
        }
    }

    fn play(
        &mut self,
        file: &AudioFile,
        generation: Generation,
    ) -> Result<Option<Duration>, BackendError> {
        self.stop();

        let source = metadata::open_decoder(file)?;
        let duration = metadata::track_duration(file, &source);

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| BackendError::Sink(e.to_string()))?;
        sink.set_volume(self.volume);
        sink.append(source);
        let sink = Arc::new(sink);

        self.active.store(generation.get(), Ordering::Release);
        if let Err(e) = self.spawn_watcher(Arc::clone(&sink), generation) {
            self.active.store(0, Ordering::Release);
            sink.stop();
            return Err(e);
        }

        debug!(path = %file.path.display(), ?duration, "mixer playback started");
        self.sink = Some(sink);
        Ok(duration)
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        self.active.store(0, Ordering::Release);
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn position(&self) -> Option<Duration> {
        self.sink.as_ref().map(|sink| sink.get_pos())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::backend::event_channel;

    #[test]
    fn superseded_watcher_exits_without_reporting() {
        let (events, mut rx) = event_channel();
        let generation = Generation::default().next();
        let active = AtomicU64::new(generation.next().get());
        let checks = AtomicUsize::new(0);

        watch(
            || {
                checks.fetch_add(1, Ordering::Relaxed);
                false
            },
            &active,
            generation,
            &events,
        );
        drop(events);

        assert_eq!(checks.load(Ordering::Relaxed), 0);
        assert_eq!(rx.try_next().unwrap(), None);
    }

    #[test]
    fn drained_sink_reports_finished_once() {
        let (events, mut rx) = event_channel();
        let generation = Generation::default().next();
        let active = AtomicU64::new(generation.get());
        let checks = AtomicUsize::new(0);

        watch(
            || checks.fetch_add(1, Ordering::Relaxed) >= 2,
            &active,
            generation,
            &events,
        );
        drop(events);

        assert_eq!(checks.load(Ordering::Relaxed), 3);
        assert_eq!(rx.try_next().unwrap(), Some(BackendEvent::Finished(generation)));
        assert_eq!(rx.try_next().unwrap(), None);
    }
}
