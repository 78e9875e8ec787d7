//! Per-frame simulation step
//!
//! Advances the whole simulation once per frame: pointer tracking, position
//! integration, force updates, then the frame's input events in arrival
//! order.

use glam::Vec2;

use super::state::SimState;

/// Pointer button identity, decoupled from any window library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// A discrete input event delivered to one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// End the run; the current frame still completes
    Quit,
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerUp { button: PointerButton },
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current pointer position in arena coordinates
    pub pointer: Vec2,
    /// Events that arrived since the previous tick, in arrival order
    pub events: Vec<InputEvent>,
}

/// Advance the simulation by one frame.
///
/// Order matters and is part of the model: positions integrate with the
/// velocities computed on the previous frame before forces are recomputed,
/// and events are drained last so a grab takes effect starting next frame.
pub fn tick(state: &mut SimState, input: &TickInput) {
    state.tracker.record(input.pointer);
    state.throw_velocity = state.tracker.estimate_velocity();

    let arena = state.arena;
    let (gravity, bounce_stop) = (state.gravity, state.bounce_stop);
    let throw = state.throw_velocity;
    for ball in &mut state.balls {
        ball.integrate(input.pointer);
        ball.step(&arena, input.pointer, throw, gravity, bounce_stop);
    }

    for event in &input.events {
        match *event {
            InputEvent::Quit => {
                state.running = false;
            }
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                pos,
            } => {
                // Each ball is hit-tested independently; overlapping
                // circles can all become held
                for ball in &mut state.balls {
                    if ball.check_select(pos) {
                        log::debug!("ball {} grabbed at {:.1},{:.1}", ball.id, pos.x, pos.y);
                    }
                }
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
            } => {
                for ball in &mut state.balls {
                    if ball.held() {
                        log::debug!(
                            "ball {} released with throw {:.2},{:.2}",
                            ball.id,
                            ball.vel.x,
                            ball.vel.y
                        );
                    }
                    ball.release();
                }
            }
            // Non-primary buttons have no binding
            InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => {}
        }
    }

    state.time_ticks += 1;
}
