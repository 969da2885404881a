//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB hex, converted to linear for an sRGB surface)
pub mod colors {
    pub const BACKGROUND_TOP: u32 = 0x2c3e50;
    pub const BACKGROUND_BOTTOM: u32 = 0x3498db;
    pub const BRICK_LIGHT: u32 = 0xe74c3c;
    pub const BRICK_DARK: u32 = 0xc0392b;
    pub const PADDLE_LIGHT: u32 = 0x2ecc71;
    pub const PADDLE_DARK: u32 = 0x27ae60;
    pub const BALL: u32 = 0xf1c40f;
    pub const SHADOW: u32 = 0x000000;

    /// Linear RGBA from a 0xRRGGBB sRGB color
    pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        [channel(16), channel(8), channel(0), alpha]
    }

    pub fn srgb_to_linear(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Component-wise mix, `t` = 0 gives `a`
    pub fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_rgba_extremes() {
        let white = rgba(0xffffff, 1.0);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
        assert_eq!(rgba(0x000000, 0.5), [0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_rgba_channel_order() {
        let c = rgba(0xff0000, 1.0);
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert_eq!(c[1], 0.0);
        assert_eq!(c[2], 0.0);
    }

    #[test]
    fn test_srgb_midtone_is_darker_in_linear() {
        let mid = srgb_to_linear(0.5);
        assert!(mid > 0.2 && mid < 0.22);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp([0.0; 4], [1.0; 4], 0.5);
        assert_eq!(mid, [0.5; 4]);
    }
}
