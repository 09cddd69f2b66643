use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;

use crate::audio::{AudioBackend, AudioPlayer, LoadError};
use crate::playback::PlaybackState;
use crate::track::TrackIdentifier;

/// Owns the single live audio player plus the user's transport state
/// (play intent, loop toggle, volume). All playback side effects in the
/// crate go through this type.
pub struct PlaybackSession<B: AudioBackend> {
    backend: B,
    player: Option<B::Player>,
    loaded_path: Option<PathBuf>,
    current_track: Option<TrackIdentifier>,
    playing: bool,
    looping: bool,
    volume: f32,
}

impl<B: AudioBackend> PlaybackSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            player: None,
            loaded_path: None,
            current_track: None,
            playing: false,
            looping: false,
            volume: 1.0,
        }
    }

    /// Releases any previous player and binds a new one to `path`,
    /// applying the current volume. Does not start playback.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        self.release_player();

        let mut player = self.backend.load(path)?;
        player.set_volume(self.volume);

        self.player = Some(player);
        self.loaded_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn play(&mut self) {
        self.playing = true;
        if let Some(player) = &mut self.player {
            player.play();
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
        if let Some(player) = &mut self.player {
            player.pause();
        }
    }

    pub fn toggle_playback(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Releases the player resource. The play intent is left untouched;
    /// a transition uses it to decide whether the next track fades in.
    pub fn stop(&mut self) {
        self.release_player();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(player) = &mut self.player {
            player.set_volume(self.volume);
        }
    }

    /// Writes a fade step to the live player without touching the
    /// stored volume setting, which remains the fade target.
    pub fn fade_volume(&mut self, volume: f32) {
        if let Some(player) = &mut self.player {
            player.set_volume(volume.clamp(0.0, 1.0));
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn player_volume(&self) -> Option<f32> {
        self.player.as_ref().map(|p| p.volume())
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    pub fn current_track(&self) -> Option<TrackIdentifier> {
        self.current_track
    }

    /// Only the transition controller calls this, on load completion or
    /// failure; user actions never set the current track directly.
    pub(crate) fn set_current_track(&mut self, track: Option<TrackIdentifier>) {
        self.current_track = track;
    }

    /// Handles a source that played to its natural end. With looping on
    /// the same path is reloaded and resumed; with looping off the
    /// player is released and `true` is returned so the caller can
    /// request an end-of-track transition.
    pub fn check_and_handle_finished(&mut self) -> bool {
        let finished = self
            .player
            .as_ref()
            .is_some_and(|p| self.playing && p.is_finished());
        if !finished {
            return false;
        }

        if self.looping {
            if let Some(path) = self.loaded_path.clone() {
                match self.load(&path) {
                    Ok(()) => {
                        self.play();
                        return false;
                    }
                    Err(e) => warn!("failed to restart looped track: {}", e),
                }
            }
        }

        self.release_player();
        true
    }

    /// Samples the live player for UI telemetry; no side effects.
    pub fn snapshot(&self) -> PlaybackState {
        let position = self
            .player
            .as_ref()
            .map(|p| p.position())
            .unwrap_or(Duration::ZERO);
        let duration = self.player.as_ref().and_then(|p| p.duration());
        let progress = match duration {
            Some(duration) if duration > Duration::ZERO => {
                (position.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };

        PlaybackState {
            is_playing: self.playing,
            is_looping: self.looping,
            volume: self.volume,
            current_track: self.current_track,
            progress,
            position,
            duration,
        }
    }

    fn release_player(&mut self) {
        // Dropping the player releases the underlying output resource.
        self.player = None;
    }
}
