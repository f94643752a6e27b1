// Pong-arena configuration types
// All settings with defaults matching the built-in mode table

use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub ai: AIConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Left paddle (player 1)
    pub left_paddle_up: String,
    pub left_paddle_down: String,

    // Right paddle (player 2, human modes only)
    pub right_paddle_up: String,
    pub right_paddle_down: String,

    // Top paddle (player 3, arena only)
    pub top_paddle_left: String,
    pub top_paddle_right: String,

    // Bottom paddle (player 4, arena only)
    pub bottom_paddle_left: String,
    pub bottom_paddle_right: String,

    // Match controls
    pub start: String,
    pub pause: String,
    pub quit: String,
    pub cycle_difficulty: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_paddle_up: "W".to_string(),
            left_paddle_down: "S".to_string(),
            right_paddle_up: "O".to_string(),
            right_paddle_down: "L".to_string(),
            top_paddle_left: "G".to_string(),
            top_paddle_right: "H".to_string(),
            bottom_paddle_left: "B".to_string(),
            bottom_paddle_right: "N".to_string(),
            start: "Space".to_string(),
            pause: "P".to_string(),
            quit: "Q".to_string(),
            cycle_difficulty: "D".to_string(),
        }
    }
}

/// Ball and paddle constants shared by every mode.
///
/// Velocities are in arena units per frame; the engine steps once per
/// scheduled frame rather than integrating wall-clock time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub ball_radius: f32,

    // Serve speed
    pub ball_initial_speed: f32,

    // Hard cap on ball speed after any paddle hit
    pub max_ball_speed: f32,

    // Speed multiplier on each paddle hit (1.05 = 5% increase)
    pub acceleration_factor: f32,

    // Deflection at the very end of a paddle, in degrees
    pub max_bounce_angle_deg: f32,

    // Share of the paddle's own velocity transferred to the ball
    pub paddle_influence: f32,

    // Paddle short side
    pub paddle_thickness: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ball_radius: 10.0,
            ball_initial_speed: 5.0,
            max_ball_speed: 15.0,
            acceleration_factor: 1.05,
            max_bounce_angle_deg: 45.0,
            paddle_influence: 0.2,
            paddle_thickness: 10.0,
        }
    }
}

impl PhysicsConfig {
    pub fn max_bounce_angle(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AIConfig {
    // AI difficulty: "easy", "medium", "hard", "impossible"
    pub difficulty: Difficulty,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second (one simulation step per frame)
    pub target_fps: u64,

    // Live paddle color (RGB values 0-255)
    pub paddle_color: [u8; 3],

    // Eliminated paddle color
    pub dead_paddle_color: [u8; 3],

    pub ball_color: [u8; 3],

    pub score_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            paddle_color: [255, 255, 255],
            dead_paddle_color: [85, 85, 85],
            ball_color: [255, 255, 255],
            score_color: [255, 255, 255],
        }
    }
}
