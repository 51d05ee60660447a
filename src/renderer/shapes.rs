//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::Aabb;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(b: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (b.min, b.max());
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Square of half size `half` around `center`, rotated by `degrees`
pub fn rotated_square(center: Vec2, half: f32, degrees: f32, color: [f32; 4]) -> Vec<Vertex> {
    // Screen y points down; negate so positive degrees turn counter-clockwise
    let rot = Vec2::from_angle(-degrees.to_radians());
    let corner = |x: f32, y: f32| {
        let p = center + rot.rotate(Vec2::new(x, y));
        Vertex::new(p.x, p.y, color)
    };
    let (a, b, c, d) = (
        corner(-half, -half),
        corner(half, -half),
        corner(half, half),
        corner(-half, half),
    );
    vec![a, b, d, d, b, c]
}

/// Upward-pointing triangle filling the bounds: base on the bottom edge,
/// apex at the top center
pub fn spike(b: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (b.min, b.max());
    vec![
        Vertex::new(min.x, max.y, color),
        Vertex::new((min.x + max.x) * 0.5, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle outline of the given stroke width, drawn inside the bounds
pub fn outline(b: &Aabb, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (min, size) = (b.min, b.size);
    let w = width.min(size.x * 0.5).min(size.y * 0.5);
    [
        Aabb::new(min.x, min.y, size.x, w),
        Aabb::new(min.x, min.y + size.y - w, size.x, w),
        Aabb::new(min.x, min.y + w, w, size.y - 2.0 * w),
        Aabb::new(min.x + size.x - w, min.y + w, w, size.y - 2.0 * w),
    ]
    .iter()
    .flat_map(|edge| rect(edge, color))
    .collect()
}
