//! Safe-direction engine
//!
//! Every threat casts an angular shadow around the observer: the cone between
//! its two tangent lines, or a half-turn wedge facing it when the observer is
//! already inside it. Folding those shadows out of the full turn leaves the
//! headings in which nothing is currently in the way. Pure functions only;
//! no locking and no shared state.

pub mod arc;
pub mod arc_math;
pub mod bounds;
pub mod geometry;
pub mod projection;

pub use arc::Arc;
pub use arc_math::{ArcIntersection, classify, merge, subtract};
pub use bounds::edge_threats;
pub use projection::Projection;

use glam::Vec2;

use crate::consts::FALLBACK_WEDGE_DEGREES;
use crate::world::{Ball, WorldView};
use crate::{bearing_degrees, normalize_degrees};

/// A threat circle in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    pub center: Vec2,
    pub radius: f32,
    /// Multiplier on `radius`; larger values make the shadow wider
    pub scale: f32,
}

impl Threat {
    pub fn new(center: Vec2, radius: f32, scale: f32) -> Self {
        Self {
            center,
            radius,
            scale,
        }
    }

    #[inline]
    pub fn effective_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Project a ball with the camera centered on `reference`
    pub fn from_ball(ball: &Ball, reference: Vec2, projection: &Projection, scale: f32) -> Self {
        Self::new(
            projection.project_to_screen(ball.position_f32(), reference),
            projection.project_diameter(ball.size).x / 2.0,
            scale,
        )
    }
}

/// The directions one threat blocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub arc: Arc,
    /// Tangent points, absent when the fallback wedge was used
    pub tangents: Option<(Vec2, Vec2)>,
}

/// Shadow cast by `threat` as seen from `observer`
pub fn shadow(observer: Vec2, threat: &Threat) -> Shadow {
    match geometry::find_tangents(threat.center, threat.effective_radius(), observer) {
        Some((t1, t2)) => Shadow {
            arc: Arc::from_angles(bearing_degrees(observer, t2), bearing_degrees(observer, t1)),
            tangents: Some((t1, t2)),
        },
        None => {
            let bearing = bearing_degrees(observer, threat.center);
            let half = FALLBACK_WEDGE_DEGREES / 2.0;
            Shadow {
                arc: Arc::new(normalize_degrees(bearing - half), FALLBACK_WEDGE_DEGREES),
                tangents: None,
            }
        }
    }
}

/// Safe headings from `observer`, ascending by start angle
pub fn find_safe_arcs(observer: Vec2, threats: &[Threat]) -> Vec<Arc> {
    find_safe_arcs_with_tangents(observer, threats).0
}

/// Like [`find_safe_arcs`], also returning the tangent points that were used
pub fn find_safe_arcs_with_tangents(observer: Vec2, threats: &[Threat]) -> (Vec<Arc>, Vec<(Vec2, Vec2)>) {
    let mut tangents = Vec::new();
    let arcs = threats.iter().fold(vec![Arc::FULL], |safe, threat| {
        let shadow = shadow(observer, threat);
        tangents.extend(shadow.tangents);
        subtract(&safe, shadow.arc)
    });
    log::trace!("{} threats leave {} safe arcs", threats.len(), arcs.len());
    (arcs, tangents)
}

/// Safe headings for our main ball against the given balls.
///
/// Everything is projected with the camera on the main ball; `scale` picks the
/// size multiplier for each threat. `None` while we own no visible ball.
pub fn find_safe_arcs_in_view<'a>(
    view: &WorldView,
    threats: impl IntoIterator<Item = &'a Ball>,
    projection: &Projection,
    scale: impl Fn(&Ball) -> f32,
) -> Option<Vec<Arc>> {
    let me = view.main_ball()?;
    let reference = me.position_f32();
    let observer = projection.project_to_screen(reference, reference);
    let threats: Vec<Threat> = threats
        .into_iter()
        .map(|ball| Threat::from_ball(ball, reference, projection, scale(ball)))
        .collect();
    Some(find_safe_arcs(observer, &threats))
}
