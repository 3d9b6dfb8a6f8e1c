//! Player and run state
//!
//! All state that must survive a tick lives here. The player is a single
//! mutable entity per run; it is reset in place on respawn, never recreated.

use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::consts::*;

/// Movement behavior family the player is currently in.
///
/// The set is closed on purpose: the movement model and the collision
/// resolver both match exhaustively, so adding a mode is a compile-checked
/// change everywhere it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Gravity + ground jumps, spinning while airborne
    #[default]
    Cube,
    /// Thrust up while holding, sink otherwise; tilt follows velocity
    Ship,
    /// Constant-speed zig-zag, up while holding and down otherwise
    Wave,
}

impl Mode {
    /// Whether ceiling contact clamps instead of crashing.
    ///
    /// The ship levels off against the ceiling; every other mode dies there.
    pub fn tolerates_ceiling(self) -> bool {
        matches!(self, Mode::Ship)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Cube => "cube",
            Mode::Ship => "ship",
            Mode::Wave => "wave",
        }
    }
}

/// The player entity.
///
/// Horizontal position is implicit: the player stays at
/// [`PLAYER_SCREEN_X`](crate::consts::PLAYER_SCREEN_X) on screen while the
/// camera scrolls, so only `y` is integrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Absolute vertical position (top edge; y grows downward)
    pub y: f32,
    /// Square side length
    pub size: f32,
    /// Vertical velocity, pixels per tick
    pub dy: f32,
    /// Rotation in degrees (render hint only, never affects collision)
    pub rot: f32,
    pub mode: Mode,
    pub grounded: bool,
    pub alive: bool,
}

impl Player {
    /// Spawn pose for a given start mode: resting on the ground line.
    pub fn spawn(mode: Mode) -> Self {
        Self {
            y: GROUND_Y - PLAYER_SIZE,
            size: PLAYER_SIZE,
            dy: 0.0,
            rot: 0.0,
            mode,
            grounded: true,
            alive: true,
        }
    }

    /// Reset in place to the spawn pose. Used on respawn.
    pub fn reset(&mut self, mode: Mode) {
        *self = Self::spawn(mode);
    }
}

/// One attempt-session of a level: the level itself plus everything that
/// changes while playing it. Owned by the scheduler; the tick function is
/// its only writer while a tick is in flight.
#[derive(Debug, Clone, Serialize)]
pub struct RunState {
    pub level: Level,
    pub player: Player,
    /// Cumulative horizontal distance scrolled since (re)spawn.
    /// Monotonically increasing while alive; reset only on respawn.
    pub camera_x: f32,
    /// 1-based attempt counter, incremented on each respawn
    pub attempts: u32,
}

impl RunState {
    pub fn new(level: Level) -> Self {
        let player = Player::spawn(level.start_mode);
        Self {
            level,
            player,
            camera_x: 0.0,
            attempts: 1,
        }
    }

    /// Crash recovery: restore the spawn pose, rewind the camera, count the
    /// attempt. The level itself is untouched (obstacles are never consumed).
    pub fn respawn(&mut self) {
        self.player.reset(self.level.start_mode);
        self.camera_x = 0.0;
        self.attempts += 1;
    }

    /// HUD progress, floor(camera / length * 100) clamped to 100.
    pub fn progress_percent(&self) -> u32 {
        ((self.camera_x / self.level.length * 100.0).floor() as u32).min(100)
    }

    /// Whether the camera has scrolled past the end of the level.
    pub fn finished(&self) -> bool {
        self.camera_x >= self.level.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Level;

    #[test]
    fn spawn_rests_on_ground() {
        let p = Player::spawn(Mode::Cube);
        assert_eq!(p.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(p.dy, 0.0);
        assert!(p.grounded);
        assert!(p.alive);
    }

    #[test]
    fn respawn_restores_identical_pose_and_counts() {
        let mut run = RunState::new(Level::generate(0));
        let spawn_y = run.player.y;

        // First death: mangle the pose thoroughly
        run.player.y = 12.0;
        run.player.dy = -9.0;
        run.player.rot = 123.0;
        run.player.mode = Mode::Ship;
        run.player.alive = false;
        run.camera_x = 4000.0;
        run.respawn();
        assert_eq!(run.attempts, 2);
        assert_eq!(run.player.y, spawn_y);
        assert_eq!(run.player.dy, 0.0);
        assert_eq!(run.player.rot, 0.0);
        assert_eq!(run.player.mode, Mode::Cube);
        assert_eq!(run.camera_x, 0.0);

        // Second death, different cause, same pose
        run.player.mode = Mode::Wave;
        run.player.y = 0.0;
        run.player.alive = false;
        run.respawn();
        assert_eq!(run.attempts, 3);
        assert_eq!(run.player.y, spawn_y);
        assert_eq!(run.player.mode, Mode::Cube);
    }

    #[test]
    fn wave_level_spawns_in_wave_mode() {
        let run = RunState::new(Level::generate(9));
        assert_eq!(run.player.mode, Mode::Wave);
    }

    #[test]
    fn progress_clamps_at_100() {
        let mut run = RunState::new(Level::generate(1));
        run.camera_x = run.level.length * 2.0;
        assert_eq!(run.progress_percent(), 100);
        assert!(run.finished());
    }
}
