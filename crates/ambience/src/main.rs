use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use ambience_core::{
    clock_label, default_search_roots, AmbienceEngine, RodioBackend, TrackCatalog, WeatherMood,
};
use chrono::Local;
use log::error;

const TICK_PERIOD: Duration = Duration::from_millis(100);

enum Command {
    Toggle,
    ToggleLoop,
    Volume(f32),
    Mood(WeatherMood),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    match words.next()? {
        "play" | "pause" | "p" => Some(Command::Toggle),
        "loop" => Some(Command::ToggleLoop),
        "vol" | "volume" => words.next()?.parse().ok().map(Command::Volume),
        "sunny" => Some(Command::Mood(WeatherMood::Sunny)),
        "rainy" => Some(Command::Mood(WeatherMood::Rainy)),
        "snowy" => Some(Command::Mood(WeatherMood::Snowy)),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

fn main() {
    env_logger::init();

    let backend = match RodioBackend::new() {
        Ok(backend) => backend,
        Err(e) => {
            error!("no audio output available: {}", e);
            std::process::exit(1);
        }
    };
    let catalog = TrackCatalog::new(default_search_roots());
    let mut engine = AmbienceEngine::new(backend, catalog);

    // Stdin is read on its own thread; the engine itself lives entirely
    // on this one.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("commands: play | loop | vol <0..1> | sunny | rainy | snowy | quit");

    let mut last_status = String::new();
    loop {
        while let Ok(line) = rx.try_recv() {
            match parse_command(line.trim()) {
                Some(Command::Quit) => return,
                Some(Command::Toggle) => engine.toggle_playback(),
                Some(Command::ToggleLoop) => {
                    let looping = !engine.state().is_looping;
                    engine.set_looping(looping);
                }
                Some(Command::Volume(v)) => engine.set_volume(v),
                Some(Command::Mood(mood)) => engine.set_mood(mood),
                None => {
                    if !line.trim().is_empty() {
                        println!("unrecognized command: {}", line.trim());
                    }
                }
            }
        }

        let state = engine.tick_now();
        let track = state
            .current_track
            .map(|t| t.title())
            .unwrap_or_else(|| "not playing".to_string());
        let status = format!(
            "[{}] {} | {} | {} {:3.0}%",
            clock_label(Local::now().time()),
            engine.mood(),
            track,
            if state.is_playing { "playing" } else { "paused" },
            state.progress * 100.0,
        );
        if status != last_status {
            println!("{}", status);
            last_status = status;
        }

        thread::sleep(TICK_PERIOD);
    }
}
