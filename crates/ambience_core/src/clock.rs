use std::fmt;

use chrono::{NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfDay {
    Am,
    Pm,
}

impl HalfDay {
    /// The token that appears in track file names.
    pub fn suffix(&self) -> &'static str {
        match self {
            HalfDay::Am => "a.m.",
            HalfDay::Pm => "p.m.",
        }
    }
}

/// Discretized wall-clock bucket: hour in 12-hour form plus AM/PM.
/// Derived fresh on every tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeKey {
    /// 1..=12, with midnight and noon both mapping to 12.
    pub hour: u8,
    pub half_day: HalfDay,
}

impl TimeKey {
    pub fn new(hour: u8, half_day: HalfDay) -> Self {
        debug_assert!((1..=12).contains(&hour));
        Self { hour, half_day }
    }

    /// Pure derivation from a wall-clock time. Stable within an hour
    /// bucket; changes exactly at each hour boundary.
    pub fn derive(time: NaiveTime) -> Self {
        Self::from_hour24(time.hour())
    }

    pub fn from_hour24(hour24: u32) -> Self {
        let half_day = if hour24 < 12 { HalfDay::Am } else { HalfDay::Pm };
        let hour = match hour24 % 12 {
            0 => 12,
            h => h as u8,
        };
        Self { hour, half_day }
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00 {}", self.hour, self.half_day.suffix())
    }
}

/// 12-hour clock string for the UI, e.g. "2:05 p.m.".
pub fn clock_label(time: NaiveTime) -> String {
    let key = TimeKey::derive(time);
    format!("{}:{:02} {}", key.hour, time.minute(), key.half_day.suffix())
}
