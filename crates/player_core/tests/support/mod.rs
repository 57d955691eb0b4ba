#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use player_core::{
    AudioBackend, AudioFile, BackendCapabilities, BackendError, Clock, Generation,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Play(PathBuf, Generation),
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
}

/// Records every call and plays nothing.
pub struct FakeBackend {
    pub capabilities: BackendCapabilities,
    pub calls: Vec<Call>,
    pub failing: HashSet<PathBuf>,
    pub duration: Option<Duration>,
    pub position: Rc<Cell<Duration>>,
}

impl FakeBackend {
    pub fn mixer() -> Self {
        Self {
            capabilities: BackendCapabilities {
                supports_pause: true,
                supports_volume: true,
                reports_position: true,
                reports_duration: true,
            },
            calls: Vec::new(),
            failing: HashSet::new(),
            duration: Some(Duration::from_secs(180)),
            position: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn blocking() -> Self {
        Self {
            capabilities: BackendCapabilities {
                supports_pause: false,
                supports_volume: false,
                reports_position: false,
                reports_duration: false,
            },
            calls: Vec::new(),
            failing: HashSet::new(),
            duration: None,
            position: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    pub fn plays(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Play(path, _) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_generation(&self) -> Option<Generation> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Play(_, generation) => Some(*generation),
            _ => None,
        })
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }
}

impl AudioBackend for FakeBackend {
    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    fn play(
        &mut self,
        file: &AudioFile,
        generation: Generation,
    ) -> Result<Option<Duration>, BackendError> {
        self.calls.push(Call::Play(file.path.clone(), generation));
        if self.failing.contains(&file.path) {
            return Err(BackendError::Decode("unsupported bitstream".into()));
        }
        self.position.set(Duration::ZERO);
        Ok(self.duration)
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::SetVolume(volume));
    }

    fn position(&self) -> Option<Duration> {
        Some(self.position.get())
    }
}

/// A clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

pub fn tracks(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

/// Writes a silent 16-bit mono PCM WAV file.
pub fn write_wav(path: &Path, sample_rate: u32, seconds: u32) {
    let data_len = sample_rate * seconds * 2;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
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
