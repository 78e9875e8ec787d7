//! Scene and physics settings
//!
//! Loaded from a JSON file so the arena and ball roster can be tuned
//! without recompiling. Missing or invalid files fall back to the built-in
//! scene.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;

/// One ball in the scene roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSpec {
    /// Starting center position; may be above the visible arena
    pub pos: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Fraction of speed retained per bounce, 0..=1
    pub restitution: f32,
    /// Horizontal deceleration per frame once settled
    pub friction: f32,
    /// RGBA, linear 0..=1
    pub color: [f32; 4],
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub arena_width: f32,
    pub arena_height: f32,
    pub wall_thickness: f32,
    pub gravity: f32,
    pub bounce_stop: f32,
    pub target_fps: u32,
    pub balls: Vec<BallSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: consts::ARENA_WIDTH,
            arena_height: consts::ARENA_HEIGHT,
            wall_thickness: consts::WALL_THICKNESS,
            gravity: consts::GRAVITY,
            bounce_stop: consts::BOUNCE_STOP,
            target_fps: consts::TARGET_FPS,
            balls: vec![
                BallSpec {
                    pos: Vec2::new(250.0, -100.0),
                    radius: 30.0,
                    mass: 100.0,
                    restitution: 0.8,
                    friction: 0.02,
                    color: [1.0, 1.0, 0.0, 1.0], // yellow
                },
                BallSpec {
                    pos: Vec2::new(500.0, -100.0),
                    radius: 50.0,
                    mass: 300.0,
                    restitution: 0.9,
                    friction: 0.03,
                    color: [1.0, 0.65, 0.0, 1.0], // orange
                },
                BallSpec {
                    pos: Vec2::new(750.0, -100.0),
                    radius: 40.0,
                    mass: 200.0,
                    restitution: 0.8,
                    friction: 0.04,
                    color: [1.0, 0.0, 0.0, 1.0], // red
                },
            ],
        }
    }
}

impl Settings {
    /// Environment variable naming an alternate settings file
    const CONFIG_ENV: &'static str = "FLINGBALL_CONFIG";
    /// Default settings file, looked up in the working directory
    const CONFIG_FILE: &'static str = "flingball.json";

    /// Load settings from the configured JSON file, falling back to the
    /// built-in scene when the file is absent or invalid.
    pub fn load() -> Self {
        let path =
            std::env::var(Self::CONFIG_ENV).unwrap_or_else(|_| Self::CONFIG_FILE.to_string());

        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {path}");
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings file {path}: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Force out-of-range values back into the model's domain, warning
    /// about each correction.
    pub fn sanitized(mut self) -> Self {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            log::warn!("Non-positive arena dimensions, using defaults");
            self.arena_width = consts::ARENA_WIDTH;
            self.arena_height = consts::ARENA_HEIGHT;
        }
        self.wall_thickness = self.wall_thickness.max(0.0);
        self.gravity = self.gravity.max(0.0);
        self.bounce_stop = self.bounce_stop.max(0.0);
        if self.target_fps == 0 {
            log::warn!("target_fps must be positive, using {}", consts::TARGET_FPS);
            self.target_fps = consts::TARGET_FPS;
        }

        // A ball must fit between the walls on both axes
        let max_radius = (self.arena_width.min(self.arena_height) - self.wall_thickness) / 2.0;
        for ball in &mut self.balls {
            if ball.radius <= 0.0 || ball.radius > max_radius {
                log::warn!(
                    "Ball radius {} out of range, clamping into (0, {max_radius}]",
                    ball.radius
                );
                ball.radius = ball.radius.clamp(1.0, max_radius);
            }
            if !(0.0..=1.0).contains(&ball.restitution) {
                log::warn!(
                    "Ball restitution {} outside [0, 1], clamping",
                    ball.restitution
                );
                ball.restitution = ball.restitution.clamp(0.0, 1.0);
            }
            ball.friction = ball.friction.max(0.0);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_matches_reference() {
        let settings = Settings::default();
        assert_eq!(settings.arena_width, 1000.0);
        assert_eq!(settings.arena_height, 800.0);
        assert_eq!(settings.wall_thickness, 10.0);
        assert_eq!(settings.balls.len(), 3);
        assert_eq!(settings.balls[0].pos, Vec2::new(250.0, -100.0));
        assert_eq!(settings.balls[0].radius, 30.0);
    }

    #[test]
    fn test_sanitize_clamps_restitution() {
        let mut settings = Settings::default();
        settings.balls[0].restitution = 1.7;
        let settings = settings.sanitized();
        assert_eq!(settings.balls[0].restitution, 1.0);
    }

    #[test]
    fn test_sanitize_rejects_oversized_ball() {
        let mut settings = Settings::default();
        settings.balls[0].radius = 5000.0;
        let settings = settings.sanitized();
        let max = (settings.arena_width.min(settings.arena_height) - settings.wall_thickness) / 2.0;
        assert!(settings.balls[0].radius <= max);
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.balls.len(), settings.balls.len());
        assert_eq!(back.gravity, settings.gravity);
    }
}
