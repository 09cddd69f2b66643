use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum LoadError {
    OutputStreamError(String),
    FileError(String),
    DecodeError(String),
    SinkError(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::OutputStreamError(e) => write!(f, "Output stream error: {}", e),
            LoadError::FileError(e) => write!(f, "File error: {}", e),
            LoadError::DecodeError(e) => write!(f, "Decode error: {}", e),
            LoadError::SinkError(e) => write!(f, "Sink error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// A single loaded track on an audio output. Exactly one of these is
/// alive at a time, owned by the playback session; dropping it releases
/// the underlying output resource.
pub trait AudioPlayer {
    fn play(&mut self);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    /// True once the source has played to its natural end.
    fn is_finished(&self) -> bool;
}

/// The opaque audio capability: turns a path into a paused, ready
/// player. The engine and the transition logic only ever talk to this
/// seam, never to a concrete audio library.
pub trait AudioBackend {
    type Player: AudioPlayer;

    /// Loads `path` without starting playback.
    fn load(&self, path: &Path) -> Result<Self::Player, LoadError>;
}
