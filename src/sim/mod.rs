//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (level layout is a pure function of the level index)
//! - No rendering or platform dependencies
//!
//! The scheduler in [`crate::game`] drives one [`tick::tick`] per fixed
//! interval; everything below it mutates nothing but the [`state::RunState`]
//! it is handed.

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ScanOutcome, player_hitbox, resolve_collisions};
pub use level::{Level, LevelConfig, Obstacle, ObstacleKind, LEVEL_CONFIGS, LEVEL_COUNT};
pub use state::{Mode, Player, RunState};
pub use tick::{tick, TickInput, TickResult};
