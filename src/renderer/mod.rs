//! WebGPU rendering module
//!
//! Geometry is tessellated on the CPU each frame (`scene`) and drawn as one
//! alpha-blended triangle list (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
