use std::path::PathBuf;

use rand::Rng;

use crate::audio::AudioFile;

/// Ordered tracks from the last file selection.
///
/// `current` is `Some` exactly when `items` is non-empty, and always in bounds.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    items: Vec<AudioFile>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a playlist from a dialog result, keeping selection order and
    /// dropping unsupported files.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let items: Vec<AudioFile> = paths.into_iter().filter_map(AudioFile::from_path).collect();
        let current = if items.is_empty() { None } else { Some(0) };
        Self { items, current }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AudioFile> {
        self.items.iter()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&AudioFile> {
        self.current.and_then(|index| self.items.get(index))
    }

    /// Moves to `index` if it is in bounds.
    pub fn select(&mut self, index: usize) -> Option<&AudioFile> {
        if index < self.items.len() {
            self.current = Some(index);
        }
        self.current()
    }

    pub fn advance(&mut self) -> Option<&AudioFile> {
        let len = self.items.len();
        self.current = self.current.map(|index| (index + 1) % len);
        self.current()
    }

    pub fn retreat(&mut self) -> Option<&AudioFile> {
        let len = self.items.len();
        self.current = self.current.map(|index| (index + len - 1) % len);
        self.current()
    }

    /// Uniform pick over the whole playlist; the current track can come up again.
    pub fn pick_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&AudioFile> {
        if self.items.is_empty() {
            return None;
        }
        self.current = Some(rng.gen_range(0..self.items.len()));
        self.current()
    }
}
