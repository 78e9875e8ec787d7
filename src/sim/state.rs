//! Arena and ball state
//!
//! A `Ball` owns its own per-frame transition logic; `tick` drives the
//! roster in declaration order and feeds held balls the shared throw
//! estimate.

use glam::Vec2;

use super::motion::MotionTracker;
use crate::settings::{BallSpec, Settings};

/// The bounded rectangular play region. Immutable for the run.
///
/// Wall lines are centered on the region edges, so half of
/// `wall_thickness` intrudes into the playable area on every side.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, wall_thickness: f32) -> Self {
        Self {
            width,
            height,
            wall_thickness,
        }
    }

    /// Leftmost reachable center x for a ball of the given radius
    #[inline]
    pub fn left_bound(&self, radius: f32) -> f32 {
        radius + self.wall_thickness / 2.0
    }

    /// Rightmost reachable center x for a ball of the given radius
    #[inline]
    pub fn right_bound(&self, radius: f32) -> f32 {
        self.width - radius - self.wall_thickness / 2.0
    }

    /// Highest reachable center y (y grows downward)
    #[inline]
    pub fn ceiling_y(&self, radius: f32) -> f32 {
        radius + self.wall_thickness / 2.0
    }

    /// Center y at which a ball of the given radius rests on the floor
    #[inline]
    pub fn floor_y(&self, radius: f32) -> f32 {
        self.height - radius - self.wall_thickness / 2.0
    }

    /// Clamp a center position so the ball stays between the walls
    pub fn clamp_inside(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(self.left_bound(radius), self.right_bound(radius)),
            pos.y.clamp(self.ceiling_y(radius), self.floor_y(radius)),
        )
    }
}

/// Interaction state of a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallState {
    /// Under physics
    #[default]
    Free,
    /// Being dragged by the pointer
    Held,
}

/// A circular body
#[derive(Debug, Clone)]
pub struct Ball {
    /// Stable identifier for logs and fixtures; the physics never reads it
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per frame. While held this is the shadow throw velocity.
    pub vel: Vec2,
    pub radius: f32,
    /// Stored for scene description; the integrator is mass-independent
    pub mass: f32,
    /// Fraction of speed retained per bounce, 0..=1
    pub restitution: f32,
    /// Horizontal deceleration per frame once bouncing has stopped
    pub friction: f32,
    pub color: [f32; 4],
    pub state: BallState,
}

impl Ball {
    pub fn from_spec(id: u32, spec: &BallSpec) -> Self {
        Self {
            id,
            pos: spec.pos,
            vel: Vec2::ZERO,
            radius: spec.radius,
            mass: spec.mass,
            restitution: spec.restitution,
            friction: spec.friction,
            color: spec.color,
            state: BallState::Free,
        }
    }

    #[inline]
    pub fn held(&self) -> bool {
        self.state == BallState::Held
    }

    /// Exact circular hit-test: squared distance to center vs radius
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.pos.distance_squared(p) <= self.radius * self.radius
    }

    /// Pointer-down selection: held iff the point lands inside the circle
    pub fn check_select(&mut self, p: Vec2) -> bool {
        self.state = if self.contains_point(p) {
            BallState::Held
        } else {
            BallState::Free
        };
        self.held()
    }

    /// Pointer-up: back under physics, keeping the shadow velocity
    pub fn release(&mut self) {
        self.state = BallState::Free;
    }

    /// Advance position by one frame using the previous frame's velocity.
    ///
    /// Runs before the force update, so displayed motion lags the force
    /// recompute by one frame.
    pub fn integrate(&mut self, pointer: Vec2) {
        match self.state {
            BallState::Free => self.pos += self.vel,
            BallState::Held => self.pos = pointer,
        }
    }

    /// Per-frame force/state update for either interaction state
    pub fn step(
        &mut self,
        arena: &Arena,
        pointer: Vec2,
        throw_vel: Vec2,
        gravity: f32,
        bounce_stop: f32,
    ) {
        match self.state {
            BallState::Free => self.step_free(arena, gravity, bounce_stop),
            BallState::Held => self.step_held(arena, pointer, throw_vel),
        }
    }

    /// Free-fall physics for one frame: gravity, floor bounce, side-wall
    /// bounce, rolling friction.
    ///
    /// The stop rules pin velocities to exactly 0.0; the friction gate
    /// below relies on that exact zero.
    pub fn step_free(&mut self, arena: &Arena, gravity: f32, bounce_stop: f32) {
        if self.pos.y < arena.floor_y(self.radius) {
            // Airborne: keep accelerating downward
            self.vel.y += gravity;
        } else if self.vel.y > bounce_stop {
            // On the floor, falling fast enough to bounce back up
            self.vel.y = -self.vel.y * self.restitution;
        } else if self.vel.y.abs() <= bounce_stop {
            // Bounces have become negligible
            self.vel.y = 0.0;
        }

        // Side walls reflect only a ball moving into them
        let crossing_left = self.pos.x < arena.left_bound(self.radius) && self.vel.x < 0.0;
        let crossing_right = self.pos.x > arena.right_bound(self.radius) && self.vel.x > 0.0;
        if crossing_left || crossing_right {
            self.vel.x = -self.vel.x * self.restitution;
            if self.vel.x.abs() < bounce_stop {
                self.vel.x = 0.0;
            }
        }

        // Rolling friction once vertical bouncing has fully stopped,
        // saturating at zero instead of flipping sign
        if self.vel.y == 0.0 && self.vel.x != 0.0 {
            if self.vel.x > 0.0 {
                self.vel.x = (self.vel.x - self.friction).max(0.0);
            } else {
                self.vel.x = (self.vel.x + self.friction).min(0.0);
            }
        }
    }

    /// Drag update: teleport to the pointer (clamped between the walls) and
    /// carry the current throw estimate as a shadow velocity so that
    /// releasing the ball produces a throw.
    pub fn step_held(&mut self, arena: &Arena, pointer: Vec2, throw_vel: Vec2) {
        self.vel = throw_vel;
        self.pos = arena.clamp_inside(pointer, self.radius);
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct SimState {
    pub arena: Arena,
    pub gravity: f32,
    pub bounce_stop: f32,
    /// Roster in declaration order; never grows or shrinks during a run
    pub balls: Vec<Ball>,
    pub tracker: MotionTracker,
    /// This frame's throw estimate, shared by every held ball
    pub throw_velocity: Vec2,
    /// Cleared by a quit event; the frame loop checks it once per frame
    pub running: bool,
    /// Completed ticks
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(settings: &Settings) -> Self {
        let arena = Arena::new(
            settings.arena_width,
            settings.arena_height,
            settings.wall_thickness,
        );
        let balls = settings
            .balls
            .iter()
            .enumerate()
            .map(|(i, spec)| Ball::from_spec(i as u32 + 1, spec))
            .collect();
        Self {
            arena,
            gravity: settings.gravity,
            bounce_stop: settings.bounce_stop,
            balls,
            tracker: MotionTracker::new(),
            throw_velocity: Vec2::ZERO,
            running: true,
            time_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOUNCE_STOP, GRAVITY};
    use proptest::prelude::*;

    fn test_arena() -> Arena {
        Arena::new(1000.0, 800.0, 10.0)
    }

    fn test_ball() -> Ball {
        Ball {
            id: 1,
            pos: Vec2::new(500.0, 400.0),
            vel: Vec2::ZERO,
            radius: 30.0,
            mass: 100.0,
            restitution: 0.8,
            friction: 0.02,
            color: [1.0, 1.0, 0.0, 1.0],
            state: BallState::Free,
        }
    }

    #[test]
    fn test_hit_test_boundary() {
        let ball = test_ball();
        // Exactly on the rim counts as a hit
        assert!(ball.contains_point(Vec2::new(500.0 + 30.0, 400.0)));
        // Just outside misses
        assert!(!ball.contains_point(Vec2::new(500.0 + 30.001, 400.0)));
        // Center hits
        assert!(ball.contains_point(ball.pos));
    }

    #[test]
    fn test_airborne_ball_accelerates() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.y = 100.0;
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.y, GRAVITY);
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.y, 2.0 * GRAVITY);
    }

    #[test]
    fn test_floor_bounce_damps_by_restitution() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.y = arena.floor_y(ball.radius);
        ball.vel.y = 5.0;
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.y, -5.0 * 0.8);
    }

    #[test]
    fn test_floor_pins_slow_bounce_to_zero() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.y = arena.floor_y(ball.radius);
        ball.vel.y = BOUNCE_STOP; // not strictly greater, so it pins
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_left_wall_reflects_leftward_ball() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.x = arena.left_bound(ball.radius) - 1.0;
        ball.pos.y = 100.0;
        ball.vel.x = -4.0;
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.x, 4.0 * 0.8);
    }

    #[test]
    fn test_wall_ignores_ball_moving_away() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.x = arena.left_bound(ball.radius) - 1.0;
        ball.pos.y = 100.0;
        ball.vel.x = 2.0; // already heading back inside
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.x, 2.0);
    }

    #[test]
    fn test_wall_pins_slow_reflection_to_zero() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.x = arena.right_bound(ball.radius) + 1.0;
        ball.pos.y = 100.0;
        ball.vel.x = 0.3; // damps to 0.24, below the stop threshold
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.x, 0.0);
    }

    #[test]
    fn test_friction_decays_to_exact_zero() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.y = arena.floor_y(ball.radius);
        ball.vel = Vec2::new(0.05, 0.0);
        // 0.05 / 0.02 per frame: two full decrements plus a saturated one
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert!((ball.vel.x - 0.03).abs() < 1e-6);
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.x, 0.0);
        // And stays there
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        assert_eq!(ball.vel.x, 0.0);
    }

    #[test]
    fn test_friction_waits_for_vertical_settle() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.pos.y = 100.0; // airborne
        ball.vel = Vec2::new(3.0, 1.0);
        ball.step_free(&arena, GRAVITY, BOUNCE_STOP);
        // Horizontal speed untouched while still bouncing/falling
        assert_eq!(ball.vel.x, 3.0);
    }

    #[test]
    fn test_select_and_release() {
        let mut ball = test_ball();
        assert!(ball.check_select(ball.pos));
        assert!(ball.held());
        ball.release();
        assert!(!ball.held());
        // A miss also clears selection
        ball.state = BallState::Held;
        assert!(!ball.check_select(Vec2::new(-100.0, -100.0)));
        assert!(!ball.held());
    }

    #[test]
    fn test_held_step_takes_throw_velocity() {
        let arena = test_arena();
        let mut ball = test_ball();
        ball.state = BallState::Held;
        let throw = Vec2::new(7.5, -3.0);
        ball.step_held(&arena, Vec2::new(400.0, 300.0), throw);
        assert_eq!(ball.vel, throw);
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
    }

    proptest! {
        #[test]
        fn held_position_always_inside_walls(px in -5000.0f32..5000.0, py in -5000.0f32..5000.0) {
            let arena = test_arena();
            let mut ball = test_ball();
            ball.state = BallState::Held;
            ball.step_held(&arena, Vec2::new(px, py), Vec2::ZERO);
            prop_assert!(ball.pos.x >= arena.left_bound(ball.radius));
            prop_assert!(ball.pos.x <= arena.right_bound(ball.radius));
            prop_assert!(ball.pos.y >= arena.ceiling_y(ball.radius));
            prop_assert!(ball.pos.y <= arena.floor_y(ball.radius));
        }

        #[test]
        fn hit_test_matches_distance(px in 0.0f32..1000.0, py in 0.0f32..800.0) {
            let ball = test_ball();
            let inside = ball.pos.distance_squared(Vec2::new(px, py)) <= ball.radius * ball.radius;
            prop_assert_eq!(ball.contains_point(Vec2::new(px, py)), inside);
        }
    }
}
