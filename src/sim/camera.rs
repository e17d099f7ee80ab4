//! Viewport follow controller
//!
//! Second-order damped tracker pulled toward the player. The reference is
//! clamped near the capture lines so the dead zones beyond them stay off
//! screen, with the reference velocity zeroed on the clamped axis to avoid
//! overshoot. Recomputed every tick; there is no terminal state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::World;
use crate::consts::*;

/// Pixel dimensions of the host's drawable surface
#[derive(Debug, Clone, Copy)]
pub struct VideoMode {
    pub width: u32,
    pub height: u32,
}

impl VideoMode {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// World-space viewport edges produced each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Damped follow state; owned by the camera, not the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraTracker {
    pub position: Vec2,
    pub velocity: Vec2,
    pub stiffness: f32,
    pub damping: f32,
    /// Vertical half-extent of the viewport in world units
    pub half_extent: f32,
    /// Fraction of a capture line's x the reference may reach
    pub line_fraction: f32,
}

impl CameraTracker {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            stiffness: CAMERA_STIFFNESS,
            damping: CAMERA_DAMPING,
            half_extent: CAMERA_HALF_EXTENT,
            line_fraction: CAMERA_LINE_FRACTION,
        }
    }

    /// Pull the follow state toward the reference and emit the bounds
    pub fn update(
        &mut self,
        reference: Vec2,
        reference_velocity: Vec2,
        world: &World,
        mode: VideoMode,
        dt: f32,
    ) -> ViewBounds {
        let mut reference = reference;
        let mut reference_velocity = reference_velocity;
        let min_x = self.line_fraction * world.red_line;
        let max_x = self.line_fraction * world.green_line;
        if reference.x < min_x {
            reference.x = min_x;
            reference_velocity.x = 0.0;
        } else if reference.x > max_x {
            reference.x = max_x;
            reference_velocity.x = 0.0;
        }

        let accel = self.stiffness * (reference - self.position)
            + self.damping * (reference_velocity - self.velocity);
        self.velocity += accel * dt;
        self.position += self.velocity * dt;

        let aspect = mode.aspect();
        ViewBounds {
            left: aspect * (self.position.x - self.half_extent),
            right: aspect * (self.position.x + self.half_extent),
            top: self.position.y + self.half_extent,
            bottom: self.position.y - self.half_extent,
        }
    }
}

impl Default for CameraTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimState;

    const DT: f32 = 1.0 / 60.0;
    const MODE: VideoMode = VideoMode {
        width: 900,
        height: 900,
    };

    #[test]
    fn test_converges_on_stationary_reference() {
        let state = SimState::new();
        let mut camera = CameraTracker::new();
        let reference = Vec2::new(0.3, 0.7);

        for _ in 0..2400 {
            camera.update(reference, Vec2::ZERO, &state.world, MODE, DT);
        }
        assert!((camera.position - reference).length() < 0.01);
        assert!(camera.velocity.length() < 0.01);
    }

    #[test]
    fn test_reference_clamped_at_capture_lines() {
        let state = SimState::new();
        let mut camera = CameraTracker::new();
        // Reference far beyond the green line; the camera must settle on
        // the clamped x instead.
        let reference = Vec2::new(10.0, 0.0);

        for _ in 0..2400 {
            camera.update(reference, Vec2::new(3.0, 0.0), &state.world, MODE, DT);
        }
        let expected_x = CAMERA_LINE_FRACTION * state.world.green_line;
        assert!((camera.position.x - expected_x).abs() < 0.01);
    }

    #[test]
    fn test_bounds_are_aspect_corrected() {
        let state = SimState::new();
        let mut camera = CameraTracker::new();
        let wide = VideoMode {
            width: 1600,
            height: 900,
        };

        let bounds = camera.update(Vec2::ZERO, Vec2::ZERO, &state.world, wide, DT);
        let aspect = wide.aspect();
        assert!((bounds.right - bounds.left - aspect * 2.0 * CAMERA_HALF_EXTENT).abs() < 1e-4);
        assert!((bounds.top - bounds.bottom - 2.0 * CAMERA_HALF_EXTENT).abs() < 1e-4);
    }
}
