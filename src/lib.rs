//! Agar.io bot client core
//!
//! Core modules:
//! - `protocol`: Binary cursor, server message decoding, outbound commands
//! - `world`: Live world model (balls, ownership, leaderboard, bounds)
//! - `session`: Frame-by-frame driver turning server frames into events
//! - `bot`: Safe-direction engine (arcs, tangents, projection)
//! - `settings`: Viewport/projection configuration

pub mod bot;
pub mod protocol;
pub mod session;
pub mod settings;
pub mod world;

pub use bot::{Arc, Projection, Threat, find_safe_arcs};
pub use protocol::{ClientCommand, ProtocolError, ServerMessage};
pub use session::{Session, SessionEvent};
pub use settings::BotSettings;
pub use world::{Ball, World, WorldView};

use glam::Vec2;

/// Protocol and geometry constants
pub mod consts {
    /// Largest size a nameless ball can have and still count as food
    pub const FOOD_MAX_SIZE: i16 = 13;
    /// Size ratio needed for one ball to eat another
    pub const EAT_RATIO: f64 = 1.3;

    /// Arcs narrower than this (degrees) are dropped as noise
    pub const SLIVER_DEGREES: f32 = 0.1;
    /// Arcs ending past this (degrees) may merge with arcs starting near 0
    pub const WRAP_MERGE_DEGREES: f32 = 359.9;
    /// Width of the shadow used when the observer sits inside a threat
    pub const FALLBACK_WEDGE_DEGREES: f32 = 180.0;

    /// Default horizontal view extent in world units
    pub const DEFAULT_VIEW_ANGLE_X: f32 = 1000.0;
    /// Default vertical view extent in world units
    pub const DEFAULT_VIEW_ANGLE_Y: f32 = 600.0;
    /// Projected diameters never shrink below this (pixels)
    pub const MIN_PROJECTED_DIAMETER: f32 = 10.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Bearing from `from` to `to` in degrees, [0, 360), clockwise in screen space
#[inline]
pub fn bearing_degrees(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

/// Unit vector pointing along a bearing given in degrees
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
