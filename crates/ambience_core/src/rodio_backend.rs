use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::audio::{AudioBackend, AudioPlayer, LoadError};

/// rodio-backed implementation of the audio capability. Holds the OS
/// output stream for the lifetime of the application; each loaded track
/// gets its own sink, released when the player is dropped.
pub struct RodioBackend {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioBackend {
    pub fn new() -> Result<Self, LoadError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| LoadError::OutputStreamError(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl AudioBackend for RodioBackend {
    type Player = RodioPlayer;

    fn load(&self, path: &Path) -> Result<RodioPlayer, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::FileError(e.to_string()))?;
        let reader = BufReader::new(file);

        let source = Decoder::new(reader).map_err(|e| LoadError::DecodeError(e.to_string()))?;
        let duration = source.total_duration();

        let sink =
            Sink::try_new(&self.stream_handle).map_err(|e| LoadError::SinkError(e.to_string()))?;
        sink.pause();
        sink.append(source);

        Ok(RodioPlayer {
            sink,
            volume: 1.0,
            duration,
            playback_started_at: None,
            paused_position: Duration::ZERO,
        })
    }
}

/// A single sink plus wall-clock position tracking; rodio does not
/// report playback position, so it is reconstructed from the time spent
/// in the playing state.
pub struct RodioPlayer {
    sink: Sink,
    volume: f32,
    duration: Option<Duration>,
    playback_started_at: Option<Instant>,
    paused_position: Duration,
}

impl AudioPlayer for RodioPlayer {
    fn play(&mut self) {
        if self.playback_started_at.is_none() {
            self.playback_started_at = Some(Instant::now());
        }
        self.sink.play();
    }

    fn pause(&mut self) {
        self.paused_position = self.position();
        self.playback_started_at = None;
        self.sink.pause();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> Duration {
        match self.playback_started_at {
            Some(started_at) => self.paused_position + started_at.elapsed(),
            None => self.paused_position,
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}
