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

/// Colors for court elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.06, 0.05, 0.09, 1.0];
    pub const FLOOR_LINE: [f32; 4] = [0.35, 0.3, 0.4, 1.0];
    pub const BACKBOARD: [f32; 4] = [0.9, 0.9, 0.95, 1.0];
    pub const NET: [f32; 4] = [0.95, 0.95, 0.95, 0.55];
    pub const RIM: [f32; 4] = [0.95, 0.35, 0.1, 1.0];
    pub const BALL: [f32; 4] = [0.93, 0.48, 0.13, 1.0];
    pub const BALL_SEAM: [f32; 4] = [0.15, 0.07, 0.03, 1.0];
    pub const DEBUG_RIM_POINT: [f32; 4] = [0.0, 0.0, 1.0, 0.5];
    pub const DEBUG_HOOP_CENTER: [f32; 4] = [0.0, 0.5, 0.0, 0.5];
    pub const DEBUG_HITBOX: [f32; 4] = [1.0, 0.0, 0.0, 0.2];
}
