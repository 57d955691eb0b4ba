use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use id3::TagLike;
use rodio::{Decoder, Sample, Source};
use tracing::trace;

use crate::audio::{AudioFile, AudioFormat};
use crate::error::BackendError;

pub fn open_decoder(file: &AudioFile) -> Result<Decoder<BufReader<File>>, BackendError> {
    let reader = File::open(&file.path).map_err(|source| BackendError::File {
        path: file.path.clone(),
        source,
    })?;

    Decoder::new(BufReader::new(reader)).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Length from the ID3 `TLEN` frame, which stores milliseconds.
pub fn tagged_duration(file: &AudioFile) -> Option<Duration> {
    if file.format != AudioFormat::Mp3 {
        return None;
    }

    match id3::Tag::read_from_path(&file.path) {
        Ok(tag) => tag
            .duration()
            .map(|millis| Duration::from_millis(u64::from(millis))),
        Err(e) => {
            trace!(path = %file.path.display(), error = %e, "no usable ID3 tag");
            None
        }
    }
}

/// Prefers the decoder's own answer, which is exact for WAV and often
/// missing for MP3.
pub fn track_duration<S>(file: &AudioFile, source: &S) -> Option<Duration>
where
    S: Source,
    S::Item: Sample,
{
    source
        .total_duration()
        .or_else(|| tagged_duration(file))
}

pub fn probe_duration(file: &AudioFile) -> Result<Option<Duration>, BackendError> {
    let source = open_decoder(file)?;
    Ok(track_duration(file, &source))
}
