use std::time::Instant;

use chrono::{Local, NaiveTime};
use log::{debug, warn};

use crate::audio::AudioBackend;
use crate::catalog::TrackCatalog;
use crate::clock::TimeKey;
use crate::playback::PlaybackState;
use crate::session::PlaybackSession;
use crate::track::TrackIdentifier;
use crate::transition::{TransitionController, TransitionOutcome, TransitionPhase};
use crate::weather::WeatherMood;

/// Initial transport state, matching the shipped defaults: playing, on
/// loop, at 80% volume.
const DEFAULT_VOLUME: f32 = 0.8;

/// Ties catalog, playback session and transition controller together
/// under a single cooperative tick. The host calls [`AmbienceEngine::tick`]
/// periodically (every ~100-500 ms); bucket rollover detection,
/// end-of-track handling and fade scheduling all happen inside that
/// call on the one logical timeline.
pub struct AmbienceEngine<B: AudioBackend> {
    catalog: TrackCatalog,
    session: PlaybackSession<B>,
    controller: TransitionController,
    mood: WeatherMood,
    /// The identifier last handed to the controller. Compared against
    /// the freshly derived one each tick; tracking the request rather
    /// than the (possibly fallback) resolved asset keeps degraded picks
    /// and failed loads from re-triggering every tick.
    requested: Option<TrackIdentifier>,
}

impl<B: AudioBackend> AmbienceEngine<B> {
    pub fn new(backend: B, catalog: TrackCatalog) -> Self {
        let mut session = PlaybackSession::new(backend);
        session.set_volume(DEFAULT_VOLUME);
        session.set_looping(true);
        session.play();

        Self {
            catalog,
            session,
            controller: TransitionController::new(),
            mood: WeatherMood::default(),
            requested: None,
        }
    }

    pub fn mood(&self) -> WeatherMood {
        self.mood
    }

    /// User weather selection. The track change itself happens on the
    /// next tick, when the desired identifier no longer matches the
    /// requested one.
    pub fn set_mood(&mut self, mood: WeatherMood) {
        self.mood = mood;
    }

    pub fn play(&mut self) {
        self.session.play();
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn toggle_playback(&mut self) {
        self.session.toggle_playback();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.session.set_volume(volume);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.session.set_looping(looping);
    }

    pub fn state(&self) -> PlaybackState {
        self.session.snapshot()
    }

    pub fn transition_phase(&self) -> TransitionPhase {
        self.controller.phase()
    }

    /// Convenience tick using the real clock.
    pub fn tick_now(&mut self) -> PlaybackState {
        self.tick(Instant::now(), Local::now().time())
    }

    /// One cooperative tick: derives the desired track from wall time
    /// and mood, requests a transition when it changed (or when a
    /// non-looping track ran out), then advances any in-flight fade.
    pub fn tick(&mut self, now: Instant, wall_time: NaiveTime) -> PlaybackState {
        // The finished check only runs between transitions: an in-flight
        // transition replaces the player anyway, and a loop restart here
        // would undo an active fade-out at full volume.
        if self.controller.is_idle() && self.session.check_and_handle_finished() {
            // Natural end with looping off: re-request the desired
            // track so the controller runs a fresh load/fade-in.
            debug!("track finished, requesting follow-up transition");
            self.requested = None;
        }

        let desired = TrackIdentifier::new(TimeKey::derive(wall_time), self.mood);
        let wants_audio = self.session.is_playing() || self.requested.is_some();
        if wants_audio && self.requested != Some(desired) {
            if self.catalog.is_empty() {
                // Only explicit transition triggers re-attempt an
                // unavailable directory, never the bare tick path.
                if let Err(e) = self.catalog.rescan() {
                    warn!("music directory scan failed: {}", e);
                }
            }
            self.controller.begin(now, &mut self.session, desired);
            self.requested = Some(desired);
        }

        if let Some(outcome) = self.controller.tick(now, &mut self.session, &self.catalog) {
            match outcome {
                TransitionOutcome::Loaded(track) => debug!("now playing {}", track),
                TransitionOutcome::Failed(track) => {
                    warn!("transition to {} failed; staying silent", track)
                }
            }
        }

        self.session.snapshot()
    }
}
