//! Map edges as pseudo-threats
//!
//! Each edge is stood in for by a ball level with the observer and as big as
//! the player, so the arc engine steers away from walls the same way it
//! steers away from enemies.

use glam::IVec2;

use crate::world::{Ball, WorldView};

/// Left, right, top and bottom edge balls (ids 0..=3); empty before the map size is known
pub fn edge_threats(view: &WorldView) -> Vec<Ball> {
    let Some(bounds) = view.bounds else {
        return Vec::new();
    };
    let here = view.position();
    let size = view.total_size().clamp(0, i32::from(i16::MAX)) as i16;

    let edge = |id: u32, x: f64, y: f64| Ball {
        position: IVec2::new(x as i32, y as i32),
        size,
        ..Ball::new(id)
    };

    vec![
        edge(0, bounds.min_x, f64::from(here.y)),
        edge(1, bounds.max_x, f64::from(here.y)),
        edge(2, f64::from(here.x), bounds.min_y),
        edge(3, f64::from(here.x), bounds.max_y),
    ]
}
