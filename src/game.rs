//! Fixed-timestep scheduler and attempt lifecycle
//!
//! [`Game`] is the context object that owns a run: the host calls
//! [`Game::frame`] once per displayed frame with the current wall-clock time
//! and hold input, and the scheduler converts elapsed time into zero or more
//! fixed 1/60 s ticks. Crash recovery and the attempt banner are deferred
//! single-shot events keyed by a run generation id, so an event scheduled
//! for a run that has since ended never touches the new one.
//!
//! Everything here is single-threaded and cooperative; the only suspension
//! points are the host's frame boundaries.

use glam::Vec2;

use crate::consts::*;
use crate::render::{PlayerPose, RenderFrame, RenderSink};
use crate::sim::{tick, Level, RunState, TickInput, TickResult};

/// Where the game is in the attempt lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No run active; `frame` is a no-op
    Menu,
    /// Ticks integrate physics
    Playing,
    /// Dead, waiting out the respawn delay; ticks are no-ops
    Crashed,
    /// Camera scrolled past the level length
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    /// Crash -> respawn transition, fires [`RESPAWN_DELAY`] after a crash
    Respawn,
    /// Clears the "ATTEMPT N" banner
    FadeAttemptBanner,
}

/// A single-shot scheduled event. `run` pins it to the generation that
/// scheduled it; a stale event is dropped, never applied.
#[derive(Debug, Clone, Copy)]
struct DeferredEvent {
    fire_at: f64,
    run: u64,
    action: DeferredAction,
}

/// One game instance. Owns all simulation state; several can coexist.
#[derive(Debug)]
pub struct Game {
    phase: GamePhase,
    run: Option<RunState>,
    /// Leftover sub-tick time, seconds
    accumulator: f64,
    /// Timestamp of the previously processed frame
    last_time: Option<f64>,
    /// Bumped on every run start/teardown; stale deferred events check it
    generation: u64,
    deferred: Vec<DeferredEvent>,
    flash_opacity: f32,
    attempt_banner: Option<u32>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            run: None,
            accumulator: 0.0,
            last_time: None,
            generation: 0,
            deferred: Vec::new(),
            flash_opacity: 0.0,
            attempt_banner: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    /// Begin a run on the given level. Resets the attempt counter and the
    /// camera, invalidates any pending deferred events.
    pub fn start_level(&mut self, index: usize, now_seconds: f64) {
        let level = Level::generate(index);
        log::info!(
            "starting level {} \"{}\" (length {:.0})",
            level.index,
            level.name,
            level.length
        );
        self.generation += 1;
        self.deferred.clear();
        self.run = Some(RunState::new(level));
        self.phase = GamePhase::Playing;
        self.accumulator = 0.0;
        self.last_time = Some(now_seconds);
        self.flash_opacity = 0.0;
        self.show_attempt_banner(now_seconds);
    }

    /// Tear the run down. Pending deferred events become inert: the
    /// generation bump means even one already extracted cannot apply.
    pub fn return_to_menu(&mut self) {
        self.generation += 1;
        self.deferred.clear();
        self.run = None;
        self.phase = GamePhase::Menu;
        self.accumulator = 0.0;
        self.last_time = None;
        self.flash_opacity = 0.0;
        self.attempt_banner = None;
        log::info!("returned to menu");
    }

    /// Process one host frame: fire due deferred events, convert elapsed
    /// wall time into fixed ticks, then hand the sink the latest state once
    /// (render rate is independent of tick rate).
    pub fn frame(&mut self, now_seconds: f64, hold: bool, sink: &mut dyn RenderSink) {
        if self.phase == GamePhase::Menu {
            return;
        }

        self.fire_due_events(now_seconds);

        let last = self.last_time.replace(now_seconds).unwrap_or(now_seconds);
        let elapsed = (now_seconds - last).clamp(0.0, MAX_FRAME_DT);
        self.accumulator += elapsed;

        let input = TickInput { hold };
        let mut ticks = 0;
        while self.accumulator >= TICK_DT && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_DT;
            ticks += 1;
            self.step(&input, now_seconds);
        }

        self.emit_frame(sink);
    }

    /// One fixed tick. No-op outside of Playing: the accumulator keeps its
    /// bookkeeping while crashed, but physics stand still.
    fn step(&mut self, input: &TickInput, now_seconds: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };

        match tick(run, input) {
            TickResult::Crashed => {
                log::debug!(
                    "crash at x={:.0} on attempt {}",
                    run.camera_x,
                    run.attempts
                );
                self.phase = GamePhase::Crashed;
                self.flash_opacity = CRASH_FLASH_OPACITY;
                self.schedule(now_seconds + RESPAWN_DELAY, DeferredAction::Respawn);
            }
            TickResult::Running => {
                if run.finished() {
                    log::info!(
                        "level \"{}\" complete on attempt {}",
                        run.level.name,
                        run.attempts
                    );
                    self.phase = GamePhase::Complete;
                }
            }
        }
    }

    fn schedule(&mut self, fire_at: f64, action: DeferredAction) {
        self.deferred.push(DeferredEvent {
            fire_at,
            run: self.generation,
            action,
        });
    }

    fn fire_due_events(&mut self, now_seconds: f64) {
        let mut due = Vec::new();
        self.deferred.retain(|ev| {
            if ev.fire_at <= now_seconds {
                due.push(*ev);
                false
            } else {
                true
            }
        });
        for ev in due {
            if ev.run != self.generation {
                continue; // scheduled for a run that has since ended
            }
            match ev.action {
                DeferredAction::Respawn => self.respawn(now_seconds),
                DeferredAction::FadeAttemptBanner => self.attempt_banner = None,
            }
        }
    }

    /// Crashed -> Playing: restore the spawn pose, count the attempt, clear
    /// the flash and announce the new attempt.
    fn respawn(&mut self, now_seconds: f64) {
        if self.phase != GamePhase::Crashed {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.respawn();
        let attempts = run.attempts;
        self.flash_opacity = 0.0;
        self.phase = GamePhase::Playing;
        self.show_attempt_banner(now_seconds);
        log::debug!("respawn: attempt {attempts}");
    }

    fn show_attempt_banner(&mut self, now_seconds: f64) {
        let attempts = self.run.as_ref().map_or(1, |r| r.attempts);
        self.attempt_banner = Some(attempts);
        self.schedule(
            now_seconds + ATTEMPT_BANNER_FADE,
            DeferredAction::FadeAttemptBanner,
        );
    }

    fn emit_frame(&self, sink: &mut dyn RenderSink) {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        let frame = RenderFrame {
            background: run.level.background,
            camera_x: run.camera_x,
            player: PlayerPose {
                position: Vec2::new(PLAYER_SCREEN_X, run.player.y),
                rotation_deg: run.player.rot,
                mode: run.player.mode,
                alive: run.player.alive,
            },
            obstacles: run.level.visible_range(run.camera_x),
            progress_percent: run.progress_percent(),
            attempt: run.attempts,
            flash_opacity: self.flash_opacity,
            attempt_banner: self.attempt_banner,
        };
        sink.frame(&frame);
    }
}
