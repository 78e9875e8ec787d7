//! Deterministic simulation module
//!
//! All physics and interaction logic lives here. This module must stay pure:
//! - Fixed per-frame step only (velocities are per-frame quantities)
//! - Stable iteration order (roster declaration order)
//! - No rendering or platform dependencies

pub mod motion;
pub mod state;
pub mod tick;

pub use motion::MotionTracker;
pub use state::{Arena, Ball, BallState, SimState};
pub use tick::{InputEvent, PointerButton, TickInput, tick};
