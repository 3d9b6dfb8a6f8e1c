//! Level model and deterministic obstacle generation
//!
//! A level is generated once at level start and never mutated mid-run. The
//! obstacle list is ordered by non-decreasing x - the collision resolver's
//! early-out scan and the render window slice both lean on that invariant.
//!
//! Layout is a pure function of the level index: spike placement draws from
//! a PCG stream seeded by the index, so every attempt (and every process)
//! sees the same level.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Mode;
use crate::consts::*;

/// Obstacle behavior on overlap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Always fatal
    Hazard,
    /// Landable from above, fatal from the side or below
    Solid,
    /// Switches the player to the carried mode, never damaging
    Trigger(Mode),
}

/// An immutable placed obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Aabb,
}

/// Per-level generation parameters
#[derive(Debug, Clone, Copy)]
pub struct LevelConfig {
    pub name: &'static str,
    /// Background color id handed through to the render sink
    pub background: &'static str,
    pub start_mode: Mode,
}

pub const LEVEL_COUNT: usize = 10;

pub const LEVEL_CONFIGS: [LevelConfig; LEVEL_COUNT] = [
    LevelConfig { name: "Warm Up", background: "#0066ff", start_mode: Mode::Cube },
    LevelConfig { name: "Side Streets", background: "#00ccff", start_mode: Mode::Cube },
    LevelConfig { name: "Neon Drift", background: "#a020f0", start_mode: Mode::Cube },
    LevelConfig { name: "Dry Spell", background: "#ff8c00", start_mode: Mode::Cube },
    LevelConfig { name: "Deep Base", background: "#4B0082", start_mode: Mode::Cube },
    LevelConfig { name: "Red Line", background: "#FF0000", start_mode: Mode::Cube },
    LevelConfig { name: "Springboard", background: "#32CD32", start_mode: Mode::Cube },
    LevelConfig { name: "Rewind", background: "#FF1493", start_mode: Mode::Cube },
    LevelConfig { name: "Orbit", background: "#00008B", start_mode: Mode::Cube },
    // The finale starts (and stays) in wave mode
    LevelConfig { name: "Overdrive", background: "#222", start_mode: Mode::Wave },
];

/// Generation cursor bounds (world units)
const GEN_START_X: f32 = 1200.0;
const GEN_END_X: f32 = 40_000.0;
/// Scrollable tail past the last obstacle
const GEN_TAIL: f32 = 2000.0;
/// A wave trigger is dropped every this many units of cube terrain
const TRIGGER_SPACING: i32 = 5000;
/// Per-level RNG stream base
const LEVEL_SEED: u64 = 0xC0BE_D05E;

/// A named, immutable obstacle course.
///
/// Serialize-only: the static config strings make this a snapshot format,
/// not a load format - a level is always rebuilt via [`Level::generate`].
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    pub index: usize,
    pub name: &'static str,
    pub background: &'static str,
    pub start_mode: Mode,
    /// Ordered by non-decreasing `rect.min.x`
    pub obstacles: Vec<Obstacle>,
    /// Total scrollable length
    pub length: f32,
}

impl Level {
    /// Build the obstacle course for a level index.
    ///
    /// Out-of-range indices are clamped to the last level rather than
    /// panicking; the menu is expected to only offer valid ones.
    pub fn generate(index: usize) -> Level {
        let index = if index < LEVEL_COUNT {
            index
        } else {
            log::warn!("level index {index} out of range, clamping");
            LEVEL_COUNT - 1
        };
        let cfg = &LEVEL_CONFIGS[index];
        let mut rng = Pcg32::seed_from_u64(LEVEL_SEED ^ index as u64);

        let mut obstacles: Vec<Obstacle> = Vec::new();
        let mut add = |kind, x: f32, y: f32, w: f32, h: f32| {
            obstacles.push(Obstacle {
                kind,
                rect: Aabb::new(Vec2::new(x, y), Vec2::new(w, h)),
            });
        };

        let mut x = GEN_START_X;
        // The generator tracks the mode the player will be in when reaching
        // the cursor, so terrain past a trigger fits the new movement rules.
        let mut cursor_mode = cfg.start_mode;

        if index == 0 {
            // Hand-placed opener: three spikes to learn the jump, two
            // platforms, then an unmissable full-height ship trigger.
            for i in 0..3 {
                add(ObstacleKind::Hazard, x + i as f32 * 400.0, GROUND_Y - 40.0, 40.0, 40.0);
            }
            add(ObstacleKind::Solid, x + 1400.0, GROUND_Y - 40.0, 120.0, 40.0);
            add(ObstacleKind::Solid, x + 1800.0, GROUND_Y - 80.0, 120.0, 40.0);
            add(
                ObstacleKind::Trigger(Mode::Ship),
                x + 2500.0,
                0.0,
                120.0,
                GROUND_Y,
            );
            cursor_mode = Mode::Ship;
            x += 3000.0;
        }

        while x < GEN_END_X {
            match cursor_mode {
                Mode::Wave => {
                    // Undulating corridor: ceiling slab down to `gap`, floor
                    // slab from `gap + 180`, drifting with a slow sine.
                    let gap = 180.0 + (x / 400.0).sin() * 80.0;
                    add(ObstacleKind::Solid, x, 0.0, 80.0, gap);
                    add(ObstacleKind::Solid, x, gap + 180.0, 80.0, 400.0);
                    x += 80.0;
                }
                Mode::Cube | Mode::Ship => {
                    add(ObstacleKind::Solid, x, GROUND_Y - 40.0, 40.0, 40.0);
                    // Trigger before the offset spike keeps x non-decreasing
                    if (x as i32) % TRIGGER_SPACING == 0 {
                        add(ObstacleKind::Trigger(Mode::Wave), x, 0.0, 120.0, GROUND_Y);
                        cursor_mode = Mode::Wave;
                    }
                    if rng.random::<f32>() > 0.4 {
                        add(ObstacleKind::Hazard, x + 120.0, GROUND_Y - 40.0, 40.0, 40.0);
                    }
                    x += 300.0;
                }
            }
        }

        let level = Level {
            index,
            name: cfg.name,
            background: cfg.background,
            start_mode: cfg.start_mode,
            obstacles,
            length: x + GEN_TAIL,
        };
        debug_assert!(!level.obstacles.is_empty());
        debug_assert!(level.length > 0.0);
        debug_assert!(level.is_sorted());
        level
    }

    /// Sort invariant check: obstacles ordered by non-decreasing left edge.
    pub fn is_sorted(&self) -> bool {
        self.obstacles
            .windows(2)
            .all(|w| w[0].rect.min.x <= w[1].rect.min.x)
    }

    /// The slice of obstacles within the render window around the camera.
    ///
    /// Binary searches on the sort invariant, so this is O(log n) plus the
    /// (small) visible count.
    pub fn visible_range(&self, camera_x: f32) -> &[Obstacle] {
        let lo = camera_x - VIEW_BEHIND;
        let hi = camera_x + VIEW_AHEAD;
        let start = self.obstacles.partition_point(|o| o.rect.min.x < lo);
        let end = self.obstacles.partition_point(|o| o.rect.min.x <= hi);
        &self.obstacles[start..end]
    }
}
