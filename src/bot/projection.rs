//! World → screen projection
//!
//! Mirrors how the game client lays the world out on the canvas, so arcs
//! computed in screen space match what a player would see.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIEW_ANGLE_X, DEFAULT_VIEW_ANGLE_Y, MIN_PROJECTED_DIAMETER};

/// Viewport and view extents used for projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Horizontal view extent in world units
    pub view_angle_x: f32,
    /// Vertical view extent in world units
    pub view_angle_y: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl Projection {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            view_angle_x: DEFAULT_VIEW_ANGLE_X,
            view_angle_y: DEFAULT_VIEW_ANGLE_Y,
        }
    }

    /// Screen position of `point` with the camera centered on `reference`
    pub fn project_to_screen(&self, point: Vec2, reference: Vec2) -> Vec2 {
        let rel = (point - reference).as_dvec2();
        let extent = glam::DVec2::new(f64::from(self.view_angle_x), f64::from(self.view_angle_y));
        let screen = glam::DVec2::new(f64::from(self.screen_width), f64::from(self.screen_height));
        ((rel / extent / 2.0 + 0.5) * screen).floor().as_vec2()
    }

    /// Projected diameter (x and y) of a ball of the given size
    pub fn project_diameter(&self, size: i16) -> Vec2 {
        let scale = f32::from(size) / 32.0;
        Vec2::new(
            (self.screen_width as f32 / 25.0 * scale).max(MIN_PROJECTED_DIAMETER),
            (self.screen_height as f32 / 25.0 * scale).max(MIN_PROJECTED_DIAMETER),
        )
    }
}
