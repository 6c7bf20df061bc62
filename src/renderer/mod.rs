//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a triangle list in screen pixels and
//! mapped to clip space on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
