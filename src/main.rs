//! Cube Rush entry point
//!
//! Headless demo: drives the simulation with a synthetic 60 Hz clock and a
//! naive autopilot, logging HUD progress and printing a JSON run summary.
//! A real frontend would instead call [`Game::frame`] from its frame
//! callback with wall-clock time and live input.

use serde::Serialize;

use cube_rush::consts::TICK_DT;
use cube_rush::render::{RenderFrame, RenderSink};
use cube_rush::{Game, GamePhase};

/// Sink that logs progress milestones instead of drawing
struct HudSink {
    last_decile: u32,
}

impl RenderSink for HudSink {
    fn frame(&mut self, frame: &RenderFrame<'_>) {
        let decile = frame.progress_percent / 10;
        if decile != self.last_decile {
            self.last_decile = decile;
            log::info!(
                "attempt {}: {}% (camera {:.0}, {} obstacles on screen)",
                frame.attempt,
                frame.progress_percent,
                frame.camera_x,
                frame.obstacles.len()
            );
        }
    }
}

#[derive(Serialize)]
struct RunSummary {
    level: usize,
    frames: u32,
    attempts: u32,
    progress_percent: u32,
    completed: bool,
}

fn main() {
    env_logger::init();

    let level = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);

    let mut game = Game::new();
    let mut sink = HudSink { last_decile: 0 };
    let mut now = 0.0;
    game.start_level(level, now);

    // Two minutes of simulated play, tapping roughly twice a second
    let max_frames = 2 * 60 * 60;
    let mut frames = 0;
    while frames < max_frames {
        now += TICK_DT;
        let hold = (frames / 15) % 2 == 0;
        game.frame(now, hold, &mut sink);
        frames += 1;
        if game.phase() == GamePhase::Complete {
            break;
        }
    }

    let summary = RunSummary {
        level,
        frames,
        attempts: game.run().map_or(0, |run| run.attempts),
        progress_percent: game.run().map_or(0, |run| run.progress_percent()),
        completed: game.phase() == GamePhase::Complete,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).unwrap_or_default()
    );
}
