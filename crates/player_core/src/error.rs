use std::path::PathBuf;

/// Errors raised while starting playback.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("Output stream error: {0}")]
    OutputStream(String),

    #[error("Failed to open {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Failed to spawn playback thread: {0}")]
    Thread(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum MediaControlsError {
    #[error("Failed to initialize media controls: {0}")]
    InitFailed(String),

    #[error("Failed to attach media controls: {0}")]
    AttachFailed(String),

    #[error("Failed to update media controls: {0}")]
    UpdateFailed(String),
}
