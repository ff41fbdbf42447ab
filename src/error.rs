use std::fmt;
use std::path::PathBuf;

/// Errors raised while reading configuration or content manifests.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Manifest(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Config(e) => write!(f, "Invalid configuration: {}", e),
            Error::Manifest(e) => write!(f, "Invalid manifest: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Manifest(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A clip that could not be turned into a playable media handle.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The source path does not exist or cannot be expressed as a file URL.
    InvalidPath(PathBuf),
    /// The pipeline refused the clip, either at construction or later on its bus.
    Load(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::InvalidPath(path) => write!(f, "invalid video path: {}", path.display()),
            MediaError::Load(e) => write!(f, "failed to load video: {}", e),
        }
    }
}

impl std::error::Error for MediaError {}

/// A play request the pipeline declined. Logged and dropped, never retried.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRejected(pub String);

impl fmt::Display for PlaybackRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback rejected: {}", self.0)
    }
}

impl std::error::Error for PlaybackRejected {}
