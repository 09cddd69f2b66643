use std::time::Duration;

use crate::track::TrackIdentifier;

/// Read-only snapshot of the playback session, sampled once per tick
/// for UI telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_looping: bool,
    /// The user's volume setting, also the fade-in target.
    pub volume: f32,
    pub current_track: Option<TrackIdentifier>,
    /// Position over duration in [0, 1]; 0.0 while duration is unknown.
    pub progress: f32,
    pub position: Duration,
    pub duration: Option<Duration>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_looping: false,
            volume: 1.0,
            current_track: None,
            progress: 0.0,
            position: Duration::ZERO,
            duration: None,
        }
    }
}
