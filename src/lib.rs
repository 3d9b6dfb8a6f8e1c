//! Cube Rush - a side-scrolling reflex platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, level generation)
//! - `game`: Fixed-timestep scheduler and attempt lifecycle
//! - `render`: Render-sink interface (the crate does no drawing itself)
//!
//! The simulation is single-threaded and frame-driven: a host calls
//! [`game::Game::frame`] once per displayed frame with a wall-clock
//! timestamp and the current hold input, and receives the latest pose,
//! camera offset and visible obstacles through a [`render::RenderSink`].

pub mod game;
pub mod render;
pub mod sim;

pub use game::{Game, GamePhase};
pub use render::{NullSink, RenderFrame, RenderSink};

/// Game configuration constants
///
/// All physics values are in pixels per tick (or per tick squared), matching
/// the fixed 60 Hz simulation rate. Y grows downward; the ground line sits at
/// `GROUND_Y` and the ceiling at y = 0.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const TICK_DT: f64 = 1.0 / 60.0;
    /// Frame-time clamp before accumulation, so a backgrounded/suspended
    /// process resumes with a bounded catch-up burst instead of a runaway one
    pub const MAX_FRAME_DT: f64 = 0.1;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    /// World bounds
    pub const GROUND_Y: f32 = 540.0;
    pub const CEILING_Y: f32 = 0.0;
    /// Horizontal scroll speed (camera advance per tick, every live tick)
    pub const SCROLL_SPEED: f32 = 9.2;

    /// Player square side length
    pub const PLAYER_SIZE: f32 = 38.0;
    /// Player's fixed x position on screen (camera-relative)
    pub const PLAYER_SCREEN_X: f32 = 400.0;
    /// Hitbox inset per side, so spike grazes feel forgiving
    pub const HITBOX_MARGIN: f32 = 8.0;

    /// Cube mode: gravity per tick, jump impulse, airborne spin (degrees/tick)
    pub const GRAVITY: f32 = 0.82;
    pub const JUMP_IMPULSE: f32 = -12.5;
    pub const CUBE_SPIN_DEG: f32 = 6.0;

    /// Ship mode: velocity delta per tick while holding / not holding
    pub const SHIP_LIFT: f32 = -0.48;
    pub const SHIP_DIVE: f32 = 0.42;
    /// Ship tilt is proportional to vertical velocity
    pub const SHIP_TILT_FACTOR: f32 = 2.5;

    /// Wave mode: fixed diagonal speed and tilt angle
    pub const WAVE_SPEED: f32 = 9.5;
    pub const WAVE_TILT_DEG: f32 = 25.0;

    /// Landing tolerance: a solid counts as a floor if the previous-tick
    /// bottom edge was no deeper than this below its top
    pub const LANDING_TOLERANCE: f32 = 12.0;
    /// Obstacle scan stops once an obstacle starts this far past the hitbox
    pub const SCAN_LOOKAHEAD: f32 = 200.0;

    /// Render window around the camera (behind / ahead)
    pub const VIEW_BEHIND: f32 = 100.0;
    pub const VIEW_AHEAD: f32 = 1300.0;

    /// Delay between crash and respawn, seconds
    pub const RESPAWN_DELAY: f64 = 0.45;
    /// Crash flash overlay opacity while waiting to respawn
    pub const CRASH_FLASH_OPACITY: f32 = 0.8;
    /// "ATTEMPT N" banner auto-fade, seconds
    pub const ATTEMPT_BANNER_FADE: f64 = 1.5;
}

/// Snap an angle in degrees to the nearest multiple of 90
#[inline]
pub fn snap_to_quarter_turn(angle_deg: f32) -> f32 {
    (angle_deg / 90.0).round() * 90.0
}
