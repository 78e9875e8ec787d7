//! WebGPU rendering module
//!
//! Flat-color triangle lists: circles for balls, thick line segments for
//! the arena walls. The sim never calls in here; the frontend reads sim
//! state and feeds vertices down.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
