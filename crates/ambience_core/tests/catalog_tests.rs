mod fixtures;

use ambience_core::{CatalogError, HalfDay, TimeKey, TrackCatalog, WeatherMood};
use fixtures::{music_dir, track_file};

#[test]
fn exact_match_is_preferred() {
    let dir = music_dir(&[
        &track_file(2, HalfDay::Pm, WeatherMood::Sunny),
        &track_file(2, HalfDay::Pm, WeatherMood::Rainy),
        &track_file(3, HalfDay::Pm, WeatherMood::Sunny),
    ]);
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    catalog.rescan().unwrap();

    let entry = catalog
        .resolve(TimeKey::new(2, HalfDay::Pm), WeatherMood::Rainy)
        .unwrap();
    assert_eq!(entry.file_name, track_file(2, HalfDay::Pm, WeatherMood::Rainy));
}

#[test]
fn mood_only_fallback_ignores_time() {
    let dir = music_dir(&[
        &track_file(9, HalfDay::Am, WeatherMood::Rainy),
        &track_file(2, HalfDay::Pm, WeatherMood::Sunny),
    ]);
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    catalog.rescan().unwrap();

    let entry = catalog
        .resolve(TimeKey::new(2, HalfDay::Pm), WeatherMood::Rainy)
        .unwrap();
    assert_eq!(entry.file_name, track_file(9, HalfDay::Am, WeatherMood::Rainy));
}

#[test]
fn any_available_fallback_beats_not_found() {
    // Only Sunny assets cataloged, Snowy requested.
    let dir = music_dir(&[
        &track_file(2, HalfDay::Pm, WeatherMood::Sunny),
        &track_file(7, HalfDay::Am, WeatherMood::Sunny),
    ]);
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    catalog.rescan().unwrap();

    let entry = catalog
        .resolve(TimeKey::new(5, HalfDay::Pm), WeatherMood::Snowy)
        .unwrap();
    assert_eq!(entry.mood, Some(WeatherMood::Sunny));
}

#[test]
fn resolution_is_total_for_non_empty_catalogs() {
    let dir = music_dir(&[&track_file(12, HalfDay::Am, WeatherMood::Sunny)]);
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    catalog.rescan().unwrap();

    for hour in 1..=12u8 {
        for half_day in [HalfDay::Am, HalfDay::Pm] {
            for mood in WeatherMood::ALL {
                assert!(catalog.resolve(TimeKey::new(hour, half_day), mood).is_ok());
            }
        }
    }
}

#[test]
fn empty_catalog_is_not_found() {
    let dir = music_dir(&[]);
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    assert_eq!(catalog.rescan(), Ok(0));

    let err = catalog
        .resolve(TimeKey::new(2, HalfDay::Pm), WeatherMood::Sunny)
        .unwrap_err();
    assert_eq!(err, CatalogError::NotFound);
}

#[test]
fn unreadable_roots_are_directory_unavailable() {
    let dir = music_dir(&[]);
    let missing = dir.path().join("nope");
    let mut catalog = TrackCatalog::new(vec![missing.clone(), missing.join("deeper")]);
    assert_eq!(catalog.rescan(), Err(CatalogError::DirectoryUnavailable));
    assert!(catalog.is_empty());
}

#[test]
fn first_non_empty_root_is_used_exclusively() {
    let empty = music_dir(&[]);
    let primary = music_dir(&[&track_file(2, HalfDay::Pm, WeatherMood::Sunny)]);
    let secondary = music_dir(&[&track_file(2, HalfDay::Pm, WeatherMood::Rainy)]);

    let mut catalog = TrackCatalog::new(vec![
        empty.path().to_path_buf(),
        primary.path().to_path_buf(),
        secondary.path().to_path_buf(),
    ]);
    catalog.rescan().unwrap();

    assert_eq!(catalog.active_root(), Some(primary.path()));
    // Roots are not merged: the Rainy asset in the secondary root is
    // invisible, so a Rainy request degrades inside the primary root.
    let entry = catalog
        .resolve(TimeKey::new(2, HalfDay::Pm), WeatherMood::Rainy)
        .unwrap();
    assert_eq!(entry.mood, Some(WeatherMood::Sunny));
}

#[test]
fn fallback_pick_is_deterministic() {
    let dir = music_dir(&[
        &track_file(9, HalfDay::Pm, WeatherMood::Sunny),
        &track_file(4, HalfDay::Am, WeatherMood::Sunny),
        &track_file(11, HalfDay::Am, WeatherMood::Sunny),
    ]);
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    catalog.rescan().unwrap();

    // Entries are ordered by file name, so the pick is stable across
    // rescans of the same directory.
    let first = catalog
        .resolve(TimeKey::new(1, HalfDay::Am), WeatherMood::Snowy)
        .unwrap()
        .file_name
        .clone();
    catalog.rescan().unwrap();
    let second = catalog
        .resolve(TimeKey::new(1, HalfDay::Am), WeatherMood::Snowy)
        .unwrap()
        .file_name
        .clone();
    assert_eq!(first, second);
}

#[test]
fn non_audio_files_are_ignored() {
    let dir = music_dir(&["cover.png", "notes.txt"]);
    std::fs::write(
        dir.path()
            .join(track_file(6, HalfDay::Pm, WeatherMood::Snowy)),
        b"",
    )
    .unwrap();
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    assert_eq!(catalog.rescan(), Ok(1));
}

#[test]
fn unparseable_track_names_still_participate_in_last_tier() {
    let dir = music_dir(&["bonus_track.mp3"]);
    let mut catalog = TrackCatalog::new(vec![dir.path().to_path_buf()]);
    assert_eq!(catalog.rescan(), Ok(1));

    let entry = catalog
        .resolve(TimeKey::new(2, HalfDay::Pm), WeatherMood::Rainy)
        .unwrap();
    assert_eq!(entry.file_name, "bonus_track.mp3");
    assert_eq!(entry.time, None);
    assert_eq!(entry.mood, None);
}
