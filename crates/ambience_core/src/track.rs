use std::fmt;

use crate::clock::{HalfDay, TimeKey};
use crate::weather::WeatherMood;

/// Artist prefix used by the expected on-disk naming scheme.
pub const DEFAULT_ARTIST_PREFIX: &str = "Nintendo Sound Team";

/// The hour separator in track file names is the full-width colon
/// (U+FF1A), not the ASCII one. It is part of the literal names the
/// asset set ships with.
pub const HOUR_MARKER: &str = "：00";

pub const TRACK_EXTENSION: &str = "mp3";

/// Canonical name of a track: a time bucket plus a weather mood. Doubles
/// as the lookup key and, through [`TrackIdentifier::file_name`], as the
/// literal file name expected on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackIdentifier {
    pub time: TimeKey,
    pub mood: WeatherMood,
}

impl TrackIdentifier {
    pub fn new(time: TimeKey, mood: WeatherMood) -> Self {
        Self { time, mood }
    }

    /// Display title without the artist prefix, e.g. "2：00 p.m. (Sunny)".
    pub fn title(&self) -> String {
        format!(
            "{}{} {} ({})",
            self.time.hour,
            HOUR_MARKER,
            self.time.half_day.suffix(),
            self.mood.token()
        )
    }

    /// The exact file name this track is expected to have on disk.
    pub fn file_name(&self, artist_prefix: &str) -> String {
        format!("{} - {}.{}", artist_prefix, self.title(), TRACK_EXTENSION)
    }
}

impl fmt::Display for TrackIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Structured keys recovered from a file name. Either part may be
/// missing; such entries only participate in the weaker fallback tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub time: Option<TimeKey>,
    pub mood: Option<WeatherMood>,
}

/// Parses the hour/half-day and mood tokens out of a file name, once,
/// at catalog build time. Tolerant of arbitrary artist prefixes.
pub fn parse_file_name(name: &str) -> ParsedName {
    ParsedName {
        time: parse_time(name),
        mood: parse_mood(name),
    }
}

fn parse_time(name: &str) -> Option<TimeKey> {
    let marker = name.find(HOUR_MARKER)?;
    let prefix = &name[..marker];
    let digits_start = prefix
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    let hour: u8 = prefix[digits_start..].parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let rest = &name[marker + HOUR_MARKER.len()..];
    let half_day = if rest.contains(HalfDay::Pm.suffix()) {
        HalfDay::Pm
    } else if rest.contains(HalfDay::Am.suffix()) {
        HalfDay::Am
    } else {
        return None;
    };
    Some(TimeKey::new(hour, half_day))
}

fn parse_mood(name: &str) -> Option<WeatherMood> {
    WeatherMood::ALL
        .into_iter()
        .find(|mood| name.contains(&format!("({})", mood.token())))
}
