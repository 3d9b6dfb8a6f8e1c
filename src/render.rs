//! Render-sink interface
//!
//! The core does no drawing. Once per frame - regardless of how many
//! simulation ticks ran - the scheduler hands the sink a [`RenderFrame`]
//! snapshot of everything a renderer needs: pose, camera, the visible
//! obstacle window, and the HUD signals (progress, attempt banner, crash
//! flash).

use glam::Vec2;

use crate::sim::{Mode, Obstacle};

/// Player pose as the renderer sees it: screen-space position, rotation in
/// degrees, and whether to draw it at all.
#[derive(Debug, Clone, Copy)]
pub struct PlayerPose {
    pub position: Vec2,
    pub rotation_deg: f32,
    pub mode: Mode,
    pub alive: bool,
}

/// Everything the renderer gets for one frame
#[derive(Debug)]
pub struct RenderFrame<'a> {
    /// Background color id of the current level
    pub background: &'static str,
    /// Cumulative scroll distance (world x of the screen's left edge)
    pub camera_x: f32,
    pub player: PlayerPose,
    /// Obstacles within the visible window around the camera, in x order
    pub obstacles: &'a [Obstacle],
    /// floor(camera / length * 100), clamped to [0, 100]
    pub progress_percent: u32,
    /// 1-based attempt counter
    pub attempt: u32,
    /// Full-screen crash flash opacity (0 when not flashing)
    pub flash_opacity: f32,
    /// "ATTEMPT N" banner, present while its fade timer is pending
    pub attempt_banner: Option<u32>,
}

/// Consumer of per-frame render state
pub trait RenderSink {
    fn frame(&mut self, frame: &RenderFrame<'_>);
}

/// Sink that discards everything. Headless runs and tests.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn frame(&mut self, _frame: &RenderFrame<'_>) {}
}
