use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::audio::AudioBackend;
use crate::catalog::TrackCatalog;
use crate::session::PlaybackSession;
use crate::track::TrackIdentifier;

/// Fade shape: ~1 second total, stepped on a fixed cadence.
pub const FADE_STEPS: u32 = 10;
pub const FADE_STEP_INTERVAL: Duration = Duration::from_millis(100);
/// Fade-in starts at this fraction of the target volume.
pub const FADE_IN_START_FRACTION: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    Out,
    In,
}

/// One in-flight volume ramp. Tagged with the generation it was created
/// under; a step whose generation no longer matches the controller's is
/// stale and must not write volume.
#[derive(Debug, Clone)]
struct FadeJob {
    direction: FadeDirection,
    current: f32,
    target: f32,
    step: f32,
    next_step_at: Instant,
    generation: u64,
}

impl FadeJob {
    fn new(
        direction: FadeDirection,
        start: f32,
        target: f32,
        now: Instant,
        generation: u64,
    ) -> Self {
        Self {
            direction,
            current: start,
            target,
            step: (target - start).abs() / FADE_STEPS as f32,
            next_step_at: now + FADE_STEP_INTERVAL,
            generation,
        }
    }
}

#[derive(Debug)]
enum Phase {
    Idle,
    FadingOut { job: FadeJob, target: TrackIdentifier },
    Loading { target: TrackIdentifier },
    FadingIn { job: FadeJob },
}

/// Public view of the state machine, for telemetry and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    Loading,
    FadingIn,
}

/// Result of a transition reaching (or failing to reach) its loaded
/// track; fades completing afterwards are silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Loaded(TrackIdentifier),
    Failed(TrackIdentifier),
}

/// Orchestrates fade-out → load → fade-in when the active track must
/// change. At most one transition is in flight; requesting a new one
/// cancels the previous fade synchronously (state replacement plus a
/// generation bump) before the successor starts, so a superseded fade
/// can never write to a player it no longer owns.
#[derive(Debug)]
pub struct TransitionController {
    phase: Phase,
    generation: u64,
}

impl TransitionController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        match self.phase {
            Phase::Idle => TransitionPhase::Idle,
            Phase::FadingOut { .. } => TransitionPhase::FadingOut,
            Phase::Loading { .. } => TransitionPhase::Loading,
            Phase::FadingIn { .. } => TransitionPhase::FadingIn,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Requests a transition to `target`. Any in-flight fade is
    /// cancelled here, before the new sequence starts. With an audible
    /// outgoing player the sequence begins with a fade-out; otherwise
    /// it goes straight to loading on the next tick.
    pub fn begin<B: AudioBackend>(
        &mut self,
        now: Instant,
        session: &mut PlaybackSession<B>,
        target: TrackIdentifier,
    ) {
        self.generation += 1;
        debug!("transition {} -> {}", self.generation, target);

        let outgoing_volume = session.player_volume().unwrap_or(0.0);
        if session.has_player() && outgoing_volume > 0.0 {
            let job = FadeJob::new(
                FadeDirection::Out,
                outgoing_volume,
                0.0,
                now,
                self.generation,
            );
            self.phase = Phase::FadingOut { job, target };
        } else {
            session.stop();
            self.phase = Phase::Loading { target };
        }
    }

    /// Advances the state machine to `now`, applying every fade step
    /// that has come due. Ticks may arrive slower than the step cadence;
    /// the catch-up loop keeps the fade on its wall-clock schedule.
    pub fn tick<B: AudioBackend>(
        &mut self,
        now: Instant,
        session: &mut PlaybackSession<B>,
        catalog: &TrackCatalog,
    ) -> Option<TransitionOutcome> {
        loop {
            match &mut self.phase {
                Phase::Idle => return None,
                Phase::FadingOut { job, target } => {
                    if job.generation != self.generation {
                        self.phase = Phase::Idle;
                        return None;
                    }
                    let target = *target;
                    let mut reached_zero = false;
                    while now >= job.next_step_at {
                        job.next_step_at += FADE_STEP_INTERVAL;
                        let next = job.current - job.step;
                        if next <= 0.0 {
                            reached_zero = true;
                            break;
                        }
                        job.current = next;
                        session.fade_volume(next);
                    }
                    if !reached_zero {
                        return None;
                    }
                    debug!("{:?} fade complete, releasing outgoing player", job.direction);
                    session.fade_volume(0.0);
                    session.stop();
                    self.phase = Phase::Loading { target };
                }
                Phase::Loading { target } => {
                    let target = *target;
                    return self.finish_loading(now, session, catalog, target);
                }
                Phase::FadingIn { job } => {
                    if job.generation != self.generation {
                        self.phase = Phase::Idle;
                        return None;
                    }
                    let mut reached_target = false;
                    while now >= job.next_step_at {
                        job.next_step_at += FADE_STEP_INTERVAL;
                        let next = job.current + job.step;
                        if next >= job.target {
                            reached_target = true;
                            break;
                        }
                        job.current = next;
                        session.fade_volume(next);
                    }
                    if reached_target {
                        // Clamp the final step; accumulated float error
                        // must never push past the target.
                        session.fade_volume(job.target);
                        debug!("{:?} fade reached target", job.direction);
                        self.phase = Phase::Idle;
                    }
                    return None;
                }
            }
        }
    }

    fn finish_loading<B: AudioBackend>(
        &mut self,
        now: Instant,
        session: &mut PlaybackSession<B>,
        catalog: &TrackCatalog,
        target: TrackIdentifier,
    ) -> Option<TransitionOutcome> {
        self.phase = Phase::Idle;

        let entry = match catalog.resolve(target.time, target.mood) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("cannot resolve track {}: {}", target, e);
                session.set_current_track(None);
                return Some(TransitionOutcome::Failed(target));
            }
        };

        if let Err(e) = session.load(&entry.path) {
            warn!("cannot load {}: {}", entry.path.display(), e);
            session.set_current_track(None);
            return Some(TransitionOutcome::Failed(target));
        }
        debug!("loaded {} for {}", entry.file_name, target);
        session.set_current_track(Some(target));

        let target_volume = session.volume();
        if session.is_playing() && target_volume > 0.0 {
            let start = target_volume * FADE_IN_START_FRACTION;
            session.fade_volume(start);
            session.play();
            let job = FadeJob::new(FadeDirection::In, start, target_volume, now, self.generation);
            self.phase = Phase::FadingIn { job };
        } else if session.is_playing() {
            session.play();
        } else {
            // Not playing: skip the fade and apply the target directly.
            session.fade_volume(target_volume);
        }

        Some(TransitionOutcome::Loaded(target))
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}
