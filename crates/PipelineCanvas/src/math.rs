//! # Geometry
//!
//! Pure functions for port anchors, wire curves and hit-testing. Everything here works in
//! canvas-local coordinates; translating to the screen is the job of [`crate::view`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which side of a node a port sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortKind {
    /// Left edge; terminates connections.
    Input,
    /// Right edge; originates connections.
    Output,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Anchor of a port for a node whose top-left corner is at `position`.
///
/// Input ports sit on the left edge, output ports on the right edge, both `port_offset_y`
/// below the top.
pub fn port_anchor(position: Vec2, node_size: Vec2, port_offset_y: f32, kind: PortKind) -> Vec2 {
    match kind {
        PortKind::Input => Vec2::new(position.x, position.y + port_offset_y),
        PortKind::Output => Vec2::new(position.x + node_size.x, position.y + port_offset_y),
    }
}

/// Calculates the two control points for a cubic Bezier curve connecting `start` to `end`.
///
/// Both control points are pushed horizontally by half the horizontal distance between the
/// endpoints, which keeps the S-shape readable whatever the vertical relationship is.
pub fn calculate_bezier_points(start: Vec2, end: Vec2) -> (Vec2, Vec2) {
    let dx = (end.x - start.x).abs() * 0.5;
    let cp1 = start + Vec2::new(dx, 0.0);
    let cp2 = end - Vec2::new(dx, 0.0);
    (cp1, cp2)
}

/// A cubic Bezier wire between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub start: Vec2,
    pub cp1: Vec2,
    pub cp2: Vec2,
    pub end: Vec2,
}

impl Wire {
    /// Builds the wire shape used for both committed and pending connections.
    pub fn between(start: Vec2, end: Vec2) -> Self {
        let (cp1, cp2) = calculate_bezier_points(start, end);
        Self {
            start,
            cp1,
            cp2,
            end,
        }
    }

    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.cp1 * (3.0 * u * u * t)
            + self.cp2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// Approximate distance from `p` to the curve, flattening it into `segments` lines.
    pub fn distance_to(&self, p: Vec2, segments: usize) -> f32 {
        let segments = segments.max(1);
        let mut best = f32::INFINITY;
        let mut prev = self.start;
        for i in 1..=segments {
            let next = self.point_at(i as f32 / segments as f32);
            best = best.min(distance_to_segment(p, prev, next));
            prev = next;
        }
        best
    }

    /// Whether `p` lies inside the click band of total width `band_width` around the curve.
    pub fn hit(&self, p: Vec2, band_width: f32, segments: usize) -> bool {
        self.distance_to(p, segments) <= band_width * 0.5
    }

    pub fn translate(&self, by: Vec2) -> Self {
        Self {
            start: self.start + by,
            cp1: self.cp1 + by,
            cp2: self.cp2 + by,
            end: self.end + by,
        }
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(208.0, 100.0);

    #[test]
    fn ports_sit_on_left_and_right_edges() {
        let pos = Vec2::new(-50.0, 20.0);
        assert_eq!(
            port_anchor(pos, SIZE, 64.0, PortKind::Input),
            Vec2::new(-50.0, 84.0)
        );
        assert_eq!(
            port_anchor(pos, SIZE, 64.0, PortKind::Output),
            Vec2::new(158.0, 84.0)
        );
    }

    #[test]
    fn control_points_use_half_horizontal_distance() {
        let (cp1, cp2) = calculate_bezier_points(Vec2::new(0.0, 0.0), Vec2::new(100.0, 300.0));
        assert_eq!(cp1, Vec2::new(50.0, 0.0));
        assert_eq!(cp2, Vec2::new(50.0, 300.0));

        // Backwards wires still bulge outward from both ports.
        let (cp1, cp2) = calculate_bezier_points(Vec2::new(100.0, 0.0), Vec2::new(0.0, 0.0));
        assert_eq!(cp1, Vec2::new(150.0, 0.0));
        assert_eq!(cp2, Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn wire_endpoints_are_exact() {
        let wire = Wire::between(Vec2::new(10.0, 10.0), Vec2::new(200.0, 80.0));
        assert_eq!(wire.point_at(0.0), wire.start);
        assert_eq!(wire.point_at(1.0), wire.end);
    }

    #[test]
    fn wire_hit_band() {
        let wire = Wire::between(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0));
        assert!(wire.hit(Vec2::new(100.0, 4.0), 10.0, 32));
        assert!(!wire.hit(Vec2::new(100.0, 6.0), 10.0, 32));
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(r.contains(Vec2::new(10.0, 0.0)));
        assert!(!r.contains(Vec2::new(10.1, 0.0)));
        assert_eq!(r.size(), Vec2::new(10.0, 10.0));
    }
}
