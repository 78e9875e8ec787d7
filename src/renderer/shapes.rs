//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::vertex::colors;
use crate::sim::Arena;

/// Triangle-fan segments used for ball circles
pub const CIRCLE_SEGMENTS: u32 = 48;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick line segment, as a quad centered on the
/// segment
pub fn line_segment(a: Vec2, b: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);

    let c1 = a + perp;
    let c2 = a - perp;
    let c3 = b + perp;
    let c4 = b - perp;

    vec![
        Vertex::new(c1.x, c1.y, color),
        Vertex::new(c2.x, c2.y, color),
        Vertex::new(c3.x, c3.y, color),
        Vertex::new(c3.x, c3.y, color),
        Vertex::new(c2.x, c2.y, color),
        Vertex::new(c4.x, c4.y, color),
    ]
}

/// The four wall lines, centered on the arena edges so half the thickness
/// faces the play area
pub fn arena_walls(arena: &Arena) -> Vec<Vertex> {
    let (w, h, t) = (arena.width, arena.height, arena.wall_thickness);
    let mut vertices = Vec::with_capacity(24);
    // left, right, top, bottom
    vertices.extend(line_segment(
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, h),
        t,
        colors::WALL,
    ));
    vertices.extend(line_segment(
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        t,
        colors::WALL,
    ));
    vertices.extend(line_segment(
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        t,
        colors::WALL,
    ));
    vertices.extend(line_segment(
        Vec2::new(0.0, h),
        Vec2::new(w, h),
        t,
        colors::WALL,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 3);
    }

    #[test]
    fn test_circle_edge_radius() {
        let verts = circle(Vec2::ZERO, 5.0, [1.0; 4], 16);
        // Every non-center vertex sits on the rim
        for chunk in verts.chunks(3) {
            for v in &chunk[1..] {
                let r = (v.position[0].powi(2) + v.position[1].powi(2)).sqrt();
                assert!((r - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_line_segment_is_quad() {
        let verts = line_segment(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        // Horizontal segment of thickness 2 spans y in [-1, 1]
        for v in &verts {
            assert!(v.position[1].abs() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_walls_cover_four_sides() {
        let arena = Arena::new(1000.0, 800.0, 10.0);
        let verts = arena_walls(&arena);
        assert_eq!(verts.len(), 4 * 6);
    }
}
