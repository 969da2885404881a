//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in canvas pixel coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::Rect;

/// Two triangles with a color per corner (top-left, top-right, bottom-right, bottom-left)
fn quad(rect: &Rect, corners: [[f32; 4]; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let [tl, tr, br, bl] = corners;
    [
        Vertex::new(l, t, tl),
        Vertex::new(r, t, tr),
        Vertex::new(l, b, bl),
        Vertex::new(l, b, bl),
        Vertex::new(r, t, tr),
        Vertex::new(r, b, br),
    ]
}

/// Solid rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    quad(rect, [color; 4])
}

/// Rectangle with a top-to-bottom gradient
pub fn vertical_gradient(rect: &Rect, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    quad(rect, [top, top, bottom, bottom])
}

/// Rectangle with a gradient from the top-left to the bottom-right corner
pub fn diagonal_gradient(rect: &Rect, from: [f32; 4], to: [f32; 4]) -> [Vertex; 6] {
    let mid = colors::lerp(from, to, 0.5);
    quad(rect, [from, mid, to, mid])
}

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

/// Soft-edged disc: opaque center fading to transparent at `radius`
pub fn glow(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut edge = color;
    edge[3] = 0.0;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            edge,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            edge,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_rect() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let verts = rect(&r, [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_vertical_gradient_colors() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        for v in vertical_gradient(&r, top, bottom) {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, [1.0; 4], 24);
        assert_eq!(verts.len(), 72);
        for v in verts {
            let d = Vec2::new(v.position[0], v.position[1]).length();
            assert!(d <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_glow_fades_to_edge() {
        let verts = glow(Vec2::ZERO, 5.0, [0.0, 0.0, 0.0, 0.5], 8);
        assert_eq!(verts[0].color[3], 0.5);
        assert_eq!(verts[1].color[3], 0.0);
    }
}
