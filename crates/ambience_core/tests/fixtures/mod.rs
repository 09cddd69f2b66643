#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use ambience_core::{
    AudioBackend, AudioPlayer, HalfDay, LoadError, TimeKey, TrackIdentifier, WeatherMood,
    DEFAULT_ARTIST_PREFIX,
};

/// Canonical on-disk file name for an (hour, half-day, mood) track.
pub fn track_file(hour: u8, half_day: HalfDay, mood: WeatherMood) -> String {
    TrackIdentifier::new(TimeKey::new(hour, half_day), mood).file_name(DEFAULT_ARTIST_PREFIX)
}

/// Builds a temporary music directory containing the given file names.
pub fn music_dir(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    dir
}

/// Everything the fake backend observed, shared with the test body.
#[derive(Default)]
pub struct BackendLog {
    pub live_players: usize,
    pub loads: Vec<PathBuf>,
    pub play_calls: Vec<u64>,
    /// Every volume write, tagged with the player it landed on.
    pub volume_writes: Vec<(u64, f32)>,
}

impl BackendLog {
    pub fn writes_for(&self, player: u64) -> Vec<f32> {
        self.volume_writes
            .iter()
            .filter(|(id, _)| *id == player)
            .map(|(_, v)| *v)
            .collect()
    }
}

/// In-memory audio backend: records loads, volume writes and the number
/// of live players, and lets tests simulate end-of-track and load
/// failures.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub log: Rc<RefCell<BackendLog>>,
    pub fail_next_load: Rc<Cell<bool>>,
    pub finished: Rc<Cell<bool>>,
    next_id: Rc<Cell<u64>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for FakeBackend {
    type Player = FakePlayer;

    fn load(&self, path: &Path) -> Result<FakePlayer, LoadError> {
        if self.fail_next_load.take() {
            return Err(LoadError::DecodeError("unsupported data".into()));
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.finished.set(false);

        let mut log = self.log.borrow_mut();
        log.loads.push(path.to_path_buf());
        log.live_players += 1;

        Ok(FakePlayer {
            id,
            log: self.log.clone(),
            finished: self.finished.clone(),
            volume: 1.0,
            playing: false,
        })
    }
}

pub struct FakePlayer {
    id: u64,
    log: Rc<RefCell<BackendLog>>,
    finished: Rc<Cell<bool>>,
    volume: f32,
    playing: bool,
}

impl AudioPlayer for FakePlayer {
    fn play(&mut self) {
        self.playing = true;
        self.log.borrow_mut().play_calls.push(self.id);
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.log
            .borrow_mut()
            .volume_writes
            .push((self.id, self.volume));
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(180))
    }

    fn is_finished(&self) -> bool {
        self.finished.get()
    }
}

impl Drop for FakePlayer {
    fn drop(&mut self) {
        self.log.borrow_mut().live_players -= 1;
    }
}
