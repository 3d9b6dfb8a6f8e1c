//! Collision detection and resolution
//!
//! Axis-aligned boxes only. The player's hitbox is camera-translated into
//! world coordinates and shrunk by a fixed margin per side so grazing a
//! spike corner feels forgiving. Obstacles are scanned in ascending-x order
//! with an early-out once they start past the lookahead window, which keeps
//! per-tick work bounded regardless of level size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{Level, ObstacleKind};
use super::state::Player;
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner (y grows downward)
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Overlap test with strict inequalities: boxes that only share an edge
    /// (zero-area intersection) do not collide.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Result of resolving one tick's collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Survived,
    Crashed,
}

/// The player's world-space hazard-test rectangle: screen position shifted
/// by the camera, inset by [`HITBOX_MARGIN`] on every side.
pub fn player_hitbox(player: &Player, camera_x: f32) -> Aabb {
    Aabb::new(
        Vec2::new(
            camera_x + PLAYER_SCREEN_X + HITBOX_MARGIN,
            player.y + HITBOX_MARGIN,
        ),
        Vec2::splat(player.size - 2.0 * HITBOX_MARGIN),
    )
}

/// Resolve ground/ceiling bounds and then the obstacle scan for one tick.
///
/// Call order matters: the ground clamp may zero `dy` and set `grounded`
/// before any obstacle is considered, and the landing rule below reads the
/// post-clamp velocity. The first fatal contact wins; the scan stops there.
pub fn resolve_collisions(player: &mut Player, camera_x: f32, level: &Level) -> ScanOutcome {
    // World bounds first
    if player.y + player.size >= GROUND_Y {
        player.y = GROUND_Y - player.size;
        player.dy = 0.0;
        player.grounded = true;
    } else if player.y <= CEILING_Y {
        player.y = CEILING_Y;
        player.dy = 0.0;
        if !player.mode.tolerates_ceiling() {
            return ScanOutcome::Crashed;
        }
    } else {
        player.grounded = false;
    }

    let hitbox = player_hitbox(player, camera_x);

    for obstacle in &level.obstacles {
        // Sort invariant pays off: nothing further can reach us this tick
        if obstacle.rect.left() > hitbox.right() + SCAN_LOOKAHEAD {
            break;
        }
        if !hitbox.overlaps(&obstacle.rect) {
            continue;
        }
        match obstacle.kind {
            ObstacleKind::Hazard => return ScanOutcome::Crashed,
            ObstacleKind::Solid => {
                // Landing only if the bottom edge was at/above the top
                // before this tick's vertical delta (plus tolerance)
                let prev_bottom = player.y - player.dy + player.size;
                if prev_bottom <= obstacle.rect.top() + LANDING_TOLERANCE {
                    player.y = obstacle.rect.top() - player.size;
                    player.dy = 0.0;
                    player.grounded = true;
                } else {
                    return ScanOutcome::Crashed;
                }
            }
            ObstacleKind::Trigger(mode) => {
                player.mode = mode;
                player.dy = 0.0;
            }
        }
    }

    ScanOutcome::Survived
}
