//! Fixed timestep simulation tick
//!
//! One tick = one 1/60 s step: advance the camera, integrate the current
//! movement mode, apply the vertical delta, then resolve collisions. The
//! scheduler decides whether ticks run at all; a tick on a dead player is a
//! no-op so the crash pose stays frozen until respawn.

use serde::{Deserialize, Serialize};

use super::collision::{resolve_collisions, ScanOutcome};
use super::state::{Mode, Player, RunState};
use crate::consts::*;
use crate::snap_to_quarter_turn;

/// Input sampled at the start of a tick (deterministic)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// The single hold signal: jump / thrust / climb depending on mode
    pub hold: bool,
}

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Running,
    /// A fatal contact happened this tick; `player.alive` is now false
    Crashed,
}

/// Advance the run by one fixed timestep.
pub fn tick(run: &mut RunState, input: &TickInput) -> TickResult {
    if !run.player.alive {
        return TickResult::Running;
    }

    // Scroll is unconditional: speed is constant and always forward
    run.camera_x += SCROLL_SPEED;

    integrate(&mut run.player, input.hold);
    run.player.y += run.player.dy;

    match resolve_collisions(&mut run.player, run.camera_x, &run.level) {
        ScanOutcome::Survived => TickResult::Running,
        ScanOutcome::Crashed => {
            run.player.alive = false;
            TickResult::Crashed
        }
    }
}

/// Per-mode velocity and rotation update. Exhaustive over [`Mode`] so a new
/// mode cannot silently fall through.
fn integrate(player: &mut Player, hold: bool) {
    match player.mode {
        Mode::Cube => {
            player.dy += GRAVITY;
            if player.grounded && hold {
                player.dy = JUMP_IMPULSE;
                player.grounded = false;
            }
            if player.grounded {
                player.rot = snap_to_quarter_turn(player.rot);
            } else {
                player.rot += CUBE_SPIN_DEG;
            }
        }
        Mode::Ship => {
            player.dy += if hold { SHIP_LIFT } else { SHIP_DIVE };
            player.rot = player.dy * SHIP_TILT_FACTOR;
        }
        Mode::Wave => {
            player.dy = if hold { -WAVE_SPEED } else { WAVE_SPEED };
            player.rot = if player.dy > 0.0 {
                WAVE_TILT_DEG
            } else {
                -WAVE_TILT_DEG
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Aabb;
    use crate::sim::level::{Level, Obstacle, ObstacleKind};
    use glam::Vec2;

    const HOLD: TickInput = TickInput { hold: true };
    const COAST: TickInput = TickInput { hold: false };

    fn empty_level() -> Level {
        Level {
            index: 0,
            name: "empty",
            background: "#000",
            start_mode: Mode::Cube,
            obstacles: vec![Obstacle {
                kind: ObstacleKind::Solid,
                rect: Aabb::new(Vec2::new(100_000.0, 0.0), Vec2::new(40.0, 40.0)),
            }],
            length: 200_000.0,
        }
    }

    fn airborne_run(mode: Mode) -> RunState {
        let mut run = RunState::new(empty_level());
        run.player.mode = mode;
        run.player.y = 250.0;
        run.player.grounded = false;
        run
    }

    #[test]
    fn airborne_cube_accumulates_gravity() {
        let mut run = airborne_run(Mode::Cube);
        let before = run.player.dy;
        tick(&mut run, &COAST);
        assert!((run.player.dy - (before + GRAVITY)).abs() < 1e-6);
        // And again next tick
        let before = run.player.dy;
        tick(&mut run, &COAST);
        assert!((run.player.dy - (before + GRAVITY)).abs() < 1e-6);
    }

    #[test]
    fn camera_advances_every_live_tick_regardless_of_mode() {
        for mode in [Mode::Cube, Mode::Ship, Mode::Wave] {
            for input in [HOLD, COAST] {
                let mut run = airborne_run(mode);
                let before = run.camera_x;
                tick(&mut run, &input);
                assert_eq!(run.camera_x, before + SCROLL_SPEED);
            }
        }
    }

    #[test]
    fn first_tick_on_the_ground_stays_clamped() {
        // Spawn pose, no hold: gravity pulls down 0.82, ground clamp undoes it
        let mut run = RunState::new(empty_level());
        let result = tick(&mut run, &COAST);
        assert_eq!(result, TickResult::Running);
        assert_eq!(run.player.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(run.player.dy, 0.0);
        assert!(run.player.grounded);
        assert_eq!(run.camera_x, SCROLL_SPEED);
    }

    #[test]
    fn grounded_hold_jumps() {
        let mut run = RunState::new(empty_level());
        let start_y = run.player.y;
        tick(&mut run, &HOLD);
        assert_eq!(run.player.dy, JUMP_IMPULSE);
        assert!(!run.player.grounded);
        assert_eq!(run.player.y, start_y + JUMP_IMPULSE);
    }

    #[test]
    fn airborne_cube_spins_and_snaps_on_landing() {
        let mut run = RunState::new(empty_level());
        tick(&mut run, &HOLD);
        let airborne_rot = run.player.rot;
        assert_eq!(airborne_rot, CUBE_SPIN_DEG);
        // Ride the jump arc back down to the ground
        for _ in 0..60 {
            tick(&mut run, &COAST);
            if run.player.grounded {
                break;
            }
        }
        assert!(run.player.grounded);
        // One more grounded tick snaps rotation to a quarter turn
        tick(&mut run, &COAST);
        assert_eq!(run.player.rot % 90.0, 0.0);
    }

    #[test]
    fn ship_eases_velocity_and_tilts() {
        let mut run = airborne_run(Mode::Ship);
        run.player.dy = 1.0;
        tick(&mut run, &HOLD);
        assert!((run.player.dy - (1.0 + SHIP_LIFT)).abs() < 1e-6);
        assert!((run.player.rot - run.player.dy * SHIP_TILT_FACTOR).abs() < 1e-6);
        tick(&mut run, &COAST);
        assert!((run.player.dy - (1.0 + SHIP_LIFT + SHIP_DIVE)).abs() < 1e-6);
    }

    #[test]
    fn wave_velocity_is_unsmoothed() {
        let mut run = airborne_run(Mode::Wave);
        tick(&mut run, &HOLD);
        assert_eq!(run.player.dy, -WAVE_SPEED);
        assert_eq!(run.player.rot, -WAVE_TILT_DEG);
        tick(&mut run, &COAST);
        assert_eq!(run.player.dy, WAVE_SPEED);
        assert_eq!(run.player.rot, WAVE_TILT_DEG);
    }

    #[test]
    fn hazard_hit_kills_and_freezes_further_ticks() {
        let mut run = airborne_run(Mode::Wave);
        // A wall of hazard right where the player will be after one tick
        run.level.obstacles.insert(
            0,
            Obstacle {
                kind: ObstacleKind::Hazard,
                rect: Aabb::new(
                    Vec2::new(SCROLL_SPEED + PLAYER_SCREEN_X, 0.0),
                    Vec2::new(200.0, GROUND_Y),
                ),
            },
        );
        assert_eq!(tick(&mut run, &COAST), TickResult::Crashed);
        assert!(!run.player.alive);

        // Dead run: nothing moves
        let camera = run.camera_x;
        let y = run.player.y;
        assert_eq!(tick(&mut run, &COAST), TickResult::Running);
        assert_eq!(run.camera_x, camera);
        assert_eq!(run.player.y, y);
    }

    #[test]
    fn trigger_switch_then_wave_rotation_next_tick() {
        let mut run = airborne_run(Mode::Cube);
        run.player.dy = 3.0;
        run.level.obstacles.insert(
            0,
            Obstacle {
                kind: ObstacleKind::Trigger(Mode::Wave),
                rect: Aabb::new(
                    Vec2::new(SCROLL_SPEED + PLAYER_SCREEN_X, 0.0),
                    Vec2::new(120.0, GROUND_Y),
                ),
            },
        );
        tick(&mut run, &COAST);
        assert_eq!(run.player.mode, Mode::Wave);
        assert_eq!(run.player.dy, 0.0);

        // The very next tick rotates with wave rules, never the cube snap.
        // (Still inside the full-height trigger, so dy is re-zeroed by it.)
        tick(&mut run, &COAST);
        assert_eq!(run.player.rot, WAVE_TILT_DEG);
    }
}
