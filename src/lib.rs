//! Flingball - grab-and-throw bouncing ball toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, wall bounces, drag-and-throw)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Data-driven scene and physics tuning

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BallSpec, Settings};

/// Simulation constants
///
/// Velocities are in pixels per frame; the integrator uses a unit time step,
/// so gravity is pixels per frame squared.
pub mod consts {
    /// Arena width in pixels
    pub const ARENA_WIDTH: f32 = 1000.0;
    /// Arena height in pixels
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Thickness of the wall lines; half of it intrudes into the arena
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Downward acceleration added to a falling ball each frame
    pub const GRAVITY: f32 = 0.5;
    /// Speed threshold below which a bounce is pinned to zero
    pub const BOUNCE_STOP: f32 = 0.3;

    /// Frame cap; also the pointer sample rate
    pub const TARGET_FPS: u32 = 60;
    /// Pointer positions kept for throw estimation (~1/3 s at 60 fps)
    pub const POINTER_WINDOW: usize = 20;
}
