use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::clock::TimeKey;
use crate::track::{parse_file_name, TRACK_EXTENSION};
use crate::weather::WeatherMood;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog holds no asset at all, even after fallback.
    NotFound,
    /// No configured search root was readable.
    DirectoryUnavailable,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound => write!(f, "no matching track in catalog"),
            CatalogError::DirectoryUnavailable => write!(f, "no music directory is readable"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A resolvable asset: its on-disk path plus the structured keys parsed
/// out of its file name at scan time.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub time: Option<TimeKey>,
    pub mood: Option<WeatherMood>,
}

/// Resolves (time bucket, mood) pairs to audio assets discovered under
/// an ordered list of search roots. The first root that exists and
/// contains at least one track is used exclusively; roots are never
/// merged.
#[derive(Debug)]
pub struct TrackCatalog {
    roots: Vec<PathBuf>,
    active_root: Option<PathBuf>,
    entries: Vec<CatalogEntry>,
}

impl TrackCatalog {
    /// Creates an unscanned catalog. `rescan` populates it; the engine
    /// calls that on the first transition trigger and whenever the
    /// catalog is still empty at trigger time.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            active_root: None,
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn active_root(&self) -> Option<&Path> {
        self.active_root.as_deref()
    }

    /// Re-discovers assets. Picks the first configured root that is
    /// readable and non-empty; entries are sorted by file name so
    /// fallback picks are deterministic. Returns the number of tracks
    /// found, or `DirectoryUnavailable` if no root could be read.
    pub fn rescan(&mut self) -> Result<usize, CatalogError> {
        self.active_root = None;
        self.entries.clear();

        let mut any_readable = false;
        for root in &self.roots {
            let read_dir = match std::fs::read_dir(root) {
                Ok(read_dir) => read_dir,
                Err(e) => {
                    debug!("skipping music root {}: {}", root.display(), e);
                    continue;
                }
            };
            any_readable = true;

            let mut entries: Vec<CatalogEntry> = read_dir
                .flatten()
                .filter_map(|entry| scan_entry(&entry.path()))
                .collect();
            if entries.is_empty() {
                debug!("music root {} has no tracks", root.display());
                continue;
            }

            entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
            info!("using music root {} ({} tracks)", root.display(), entries.len());
            self.active_root = Some(root.clone());
            self.entries = entries;
            return Ok(self.entries.len());
        }

        if any_readable {
            warn!("no configured music root contains any track");
            Ok(0)
        } else {
            Err(CatalogError::DirectoryUnavailable)
        }
    }

    /// Three-tier graceful degradation: exact hour+half-day+mood match,
    /// then any asset with the right mood, then any asset at all.
    /// Playing something plausible beats playing nothing; only an empty
    /// catalog fails.
    pub fn resolve(&self, key: TimeKey, mood: WeatherMood) -> Result<&CatalogEntry, CatalogError> {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.time == Some(key) && e.mood == Some(mood))
        {
            return Ok(entry);
        }

        if let Some(entry) = self.entries.iter().find(|e| e.mood == Some(mood)) {
            debug!(
                "no exact match for {} {}, degrading to mood-only: {}",
                key, mood, entry.file_name
            );
            return Ok(entry);
        }

        match self.entries.first() {
            Some(entry) => {
                debug!(
                    "no {} track at all, degrading to any available: {}",
                    mood, entry.file_name
                );
                Ok(entry)
            }
            None => Err(CatalogError::NotFound),
        }
    }
}

fn scan_entry(path: &Path) -> Option<CatalogEntry> {
    if !path.is_file() {
        return None;
    }
    let extension = path.extension()?.to_str()?;
    if !extension.eq_ignore_ascii_case(TRACK_EXTENSION) {
        return None;
    }
    let file_name = path.file_name()?.to_str()?.to_string();
    let parsed = parse_file_name(&file_name);
    Some(CatalogEntry {
        path: path.to_path_buf(),
        file_name,
        time: parsed.time,
        mood: parsed.mood,
    })
}

/// Default ordered search roots: a `Musics` directory bundled next to
/// the executable, then an `Ambience` folder under the user's audio
/// directory as the development fallback.
pub fn default_search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            roots.push(dir.join("Musics"));
        }
    }
    if let Some(audio_dir) = dirs::audio_dir() {
        roots.push(audio_dir.join("Ambience"));
    }
    roots
}
