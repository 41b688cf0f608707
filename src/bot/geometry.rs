//! Circle and line geometry
//!
//! Pure numeric routines over screen-space points. Degenerate inputs
//! (nested, coincident or too-distant circles, parallel lines) come back as
//! `None` / [`Intersections::None`] instead of NaN points.

use glam::Vec2;

/// Intersection points of a line or circle with a circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersections {
    None,
    /// Touching at a single point
    One(Vec2),
    Two(Vec2, Vec2),
}

impl Intersections {
    pub fn count(&self) -> usize {
        match self {
            Intersections::None => 0,
            Intersections::One(_) => 1,
            Intersections::Two(..) => 2,
        }
    }

    /// Both points, repeating the touching point when there is only one
    pub fn pair(&self) -> Option<(Vec2, Vec2)> {
        match *self {
            Intersections::None => None,
            Intersections::One(p) => Some((p, p)),
            Intersections::Two(p, q) => Some((p, q)),
        }
    }
}

/// Tangent points on a circle as seen from an external point.
///
/// Returns `None` when the point is on or inside the circle. With `u` the
/// bearing from the point to the center and `α` the half-angle of the cone,
/// the first point lies at `u + α` and the second at `u − α` (atan2 order).
pub fn find_tangents(center: Vec2, radius: f32, external: Vec2) -> Option<(Vec2, Vec2)> {
    let d_squared = center.distance_squared(external);
    if d_squared <= radius * radius {
        return None;
    }
    let len = (d_squared - radius * radius).sqrt();
    circle_circle_intersections(center, radius, external, len).pair()
}

/// Intersection points of two circles
pub fn circle_circle_intersections(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> Intersections {
    let dist = c0.distance(c1);

    if dist > r0 + r1 {
        // Too far apart
        return Intersections::None;
    }
    if dist < (r0 - r1).abs() {
        // One contains the other
        return Intersections::None;
    }
    if dist == 0.0 {
        // Coincident (or concentric, caught above unless equal radii)
        return Intersections::None;
    }

    let a = (r0 * r0 - r1 * r1 + dist * dist) / (2.0 * dist);
    let h = (r0 * r0 - a * a).max(0.0).sqrt();
    let mid = c0 + a * (c1 - c0) / dist;
    let offset = h * Vec2::new(c1.y - c0.y, -(c1.x - c0.x)) / dist;

    if h == 0.0 {
        Intersections::One(mid)
    } else {
        Intersections::Two(mid + offset, mid - offset)
    }
}

/// Intersection points of the infinite line through `p1`, `p2` with a circle
pub fn line_circle_intersections(center: Vec2, radius: f32, p1: Vec2, p2: Vec2) -> Intersections {
    let d = p2 - p1;
    let rel = p1 - center;
    let a = d.length_squared();
    let b = 2.0 * d.dot(rel);
    let c = rel.length_squared() - radius * radius;
    let det = b * b - 4.0 * a * c;

    if a <= 1e-7 || det < 0.0 {
        Intersections::None
    } else if det == 0.0 {
        Intersections::One(p1 + d * (-b / (2.0 * a)))
    } else {
        let root = det.sqrt();
        let t1 = (-b + root) / (2.0 * a);
        let t2 = (-b - root) / (2.0 * a);
        Intersections::Two(p1 + d * t1, p1 + d * t2)
    }
}

/// Tangent lines shared by two circles.
///
/// Every line is a pair `(point on the first circle, point on the second)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleTangents {
    pub outer: [(Vec2, Vec2); 2],
    /// Missing when the circles overlap
    pub inner: Option<[(Vec2, Vec2); 2]>,
}

impl CircleTangents {
    fn swapped(self) -> Self {
        let flip = |(p, q): (Vec2, Vec2)| (q, p);
        Self {
            outer: self.outer.map(flip),
            inner: self.inner.map(|lines| lines.map(flip)),
        }
    }
}

/// Outer and inner tangent lines of two circles; `None` if one contains the other
pub fn circle_circle_tangents(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> Option<CircleTangents> {
    if r1 > r2 {
        return circle_circle_tangents(c2, r2, c1, r1).map(CircleTangents::swapped);
    }

    // Outer tangents: tangents from c1 to a circle of radius r2 - r1, pushed out by r1
    let (o1, o2) = find_tangents(c2, r2 - r1, c1)?;
    let v1 = Vec2::new(-(o1.y - c1.y), o1.x - c1.x).normalize_or_zero() * r1;
    let v2 = Vec2::new(o2.y - c1.y, -(o2.x - c1.x)).normalize_or_zero() * r1;
    let outer = [(c1 + v1, o1 + v1), (c1 + v2, o2 + v2)];

    if c1.distance(c2) <= r1 + r2 {
        return Some(CircleTangents { outer, inner: None });
    }

    // Inner tangents: tangents from c2 to a circle of radius r1 + r2, pulled in by r2
    let inner = find_tangents(c1, r1 + r2, c2).map(|(i1, i2)| {
        let w1 = Vec2::new(i1.y - c2.y, -(i1.x - c2.x)).normalize_or_zero() * r2;
        let w2 = Vec2::new(-(i2.y - c2.y), i2.x - c2.x).normalize_or_zero() * r2;
        [(i1 + w1, c2 + w1), (i2 + w2, c2 + w2)]
    });

    Some(CircleTangents { outer, inner })
}

/// Where two segments (or their lines) meet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntersection {
    /// Intersection of the infinite lines
    pub point: Vec2,
    /// Whether the point lies on both segments
    pub segments_intersect: bool,
    /// Closest point to the other line on `p1..p2`
    pub closest_on_first: Vec2,
    /// Closest point to the other line on `p3..p4`
    pub closest_on_second: Vec2,
}

/// Intersection of segments `p1..p2` and `p3..p4`; `None` if they are parallel
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<SegmentIntersection> {
    let d12 = p2 - p1;
    let d34 = p4 - p3;
    let denominator = d12.y * d34.x - d12.x * d34.y;

    let t1 = ((p1.x - p3.x) * d34.y + (p3.y - p1.y) * d34.x) / denominator;
    if !t1.is_finite() {
        return None;
    }
    let t2 = ((p3.x - p1.x) * d12.y + (p1.y - p3.y) * d12.x) / -denominator;

    let segments_intersect = (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2);
    Some(SegmentIntersection {
        point: p1 + d12 * t1,
        segments_intersect,
        closest_on_first: p1 + d12 * t1.clamp(0.0, 1.0),
        closest_on_second: p3 + d34 * t2.clamp(0.0, 1.0),
    })
}
