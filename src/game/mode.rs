// Mode configuration table
//
// Every per-mode constant lives here; the match state machine reads a
// `ModeConfig` once at reset time and never mutates it.

use std::f32::consts::FRAC_PI_6;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::ai::Difficulty;
use crate::config::PhysicsConfig;
use crate::error::EngineError;

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Player 1 against the AI on the right paddle
    ClassicVsAi,
    /// Two humans sharing a keyboard
    ClassicTwoPlayer,
    /// Four paddles, one per edge, three lives each
    Arena,
}

impl GameMode {
    pub fn display_name(&self) -> &str {
        match self {
            GameMode::ClassicVsAi => "1 Player vs AI",
            GameMode::ClassicTwoPlayer => "2 Players",
            GameMode::Arena => "4 Player Arena",
        }
    }

    pub fn all() -> Vec<GameMode> {
        vec![GameMode::ClassicVsAi, GameMode::ClassicTwoPlayer, GameMode::Arena]
    }

    /// Which seats are controlled by the AI in this mode
    pub fn is_ai_seat(&self, side: Side) -> bool {
        matches!((self, side), (GameMode::ClassicVsAi, Side::Right))
    }
}

/// Which edges carry a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleLayout {
    TwoVertical,
    FourSided,
}

impl PaddleLayout {
    pub fn sides(&self) -> &'static [Side] {
        match self {
            PaddleLayout::TwoVertical => &[Side::Left, Side::Right],
            PaddleLayout::FourSided => &Side::ALL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinCondition {
    /// First to this many points wins
    Points(u32),
    /// Everyone starts with this many lives, last one standing wins
    Lives(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServeRule {
    /// Roughly horizontal, toward a random side: angle within ±`max_angle`
    Horizontal { max_angle: f32 },
    /// Any direction
    AnyDirection,
}

/// Resolved constants for one match
#[derive(Debug, Clone, PartialEq)]
pub struct ModeConfig {
    pub mode: GameMode,
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_length: f32,
    pub paddle_speed: f32,
    pub layout: PaddleLayout,
    pub win: WinCondition,
    pub serve: ServeRule,
    pub serve_delay: Duration,
    pub physics: PhysicsConfig,
}

const CLASSIC_WIDTH: f32 = 800.0;
const CLASSIC_HEIGHT: f32 = 600.0;
const CLASSIC_PADDLE_LENGTH: f32 = 100.0;
const CLASSIC_PADDLE_SPEED: f32 = 8.0;
const CLASSIC_WINNING_SCORE: u32 = 3;

const ARENA_SIZE: f32 = 800.0;
const ARENA_PADDLE_LENGTH: f32 = 80.0;
const ARENA_PADDLE_SPEED: f32 = 7.0;
const ARENA_STARTING_LIVES: u32 = 3;

const SERVE_DELAY: Duration = Duration::from_millis(1000);

impl ModeConfig {
    pub fn for_mode(mode: GameMode, physics: &PhysicsConfig) -> Self {
        match mode {
            GameMode::ClassicVsAi | GameMode::ClassicTwoPlayer => Self {
                mode,
                arena_width: CLASSIC_WIDTH,
                arena_height: CLASSIC_HEIGHT,
                paddle_length: CLASSIC_PADDLE_LENGTH,
                paddle_speed: CLASSIC_PADDLE_SPEED,
                layout: PaddleLayout::TwoVertical,
                win: WinCondition::Points(CLASSIC_WINNING_SCORE),
                serve: ServeRule::Horizontal {
                    max_angle: FRAC_PI_6,
                },
                serve_delay: SERVE_DELAY,
                physics: physics.clone(),
            },
            GameMode::Arena => Self {
                mode,
                arena_width: ARENA_SIZE,
                arena_height: ARENA_SIZE,
                paddle_length: ARENA_PADDLE_LENGTH,
                paddle_speed: ARENA_PADDLE_SPEED,
                layout: PaddleLayout::FourSided,
                win: WinCondition::Lives(ARENA_STARTING_LIVES),
                serve: ServeRule::AnyDirection,
                serve_delay: SERVE_DELAY,
                physics: physics.clone(),
            },
        }
    }

    /// Extent of the arena along a paddle's axis of motion
    pub fn travel_extent(&self, side: Side) -> f32 {
        if side.is_vertical() {
            self.arena_height
        } else {
            self.arena_width
        }
    }

    /// Reject tables that cannot describe playable geometry.
    pub fn validate(&self) -> Result<(), EngineError> {
        let p = &self.physics;
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_length", self.paddle_length),
            ("paddle_speed", self.paddle_speed),
            ("paddle_thickness", p.paddle_thickness),
            ("ball_radius", p.ball_radius),
            ("ball_initial_speed", p.ball_initial_speed),
            ("max_ball_speed", p.max_ball_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for side in self.layout.sides() {
            if self.paddle_length > self.travel_extent(*side) {
                return Err(EngineError::InvalidConfig(format!(
                    "paddle_length {} does not fit the {:?} edge",
                    self.paddle_length, side
                )));
            }
        }
        if p.ball_initial_speed > p.max_ball_speed {
            return Err(EngineError::InvalidConfig(
                "ball_initial_speed exceeds max_ball_speed".to_string(),
            ));
        }
        if p.acceleration_factor < 1.0 {
            return Err(EngineError::InvalidConfig(
                "acceleration_factor below 1.0 would slow the ball".to_string(),
            ));
        }
        match self.win {
            WinCondition::Points(0) | WinCondition::Lives(0) => Err(EngineError::InvalidConfig(
                "win condition target must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Everything the host picks before a match; immutable once the match starts.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub physics: PhysicsConfig,
    /// Arena seats with nobody in them; they start eliminated
    pub vacant: Vec<Side>,
}

impl MatchConfig {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            physics: PhysicsConfig::default(),
            vacant: Vec::new(),
        }
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_vacant(mut self, side: Side) -> Self {
        if !self.vacant.contains(&side) {
            self.vacant.push(side);
        }
        self
    }

    pub fn mode_config(&self) -> ModeConfig {
        ModeConfig::for_mode(self.mode, &self.physics)
    }

    /// Resolve and validate the mode table entry for this match.
    pub fn resolve(&self) -> Result<ModeConfig, EngineError> {
        let mode = self.mode_config();
        mode.validate()?;

        if !self.vacant.is_empty() {
            if mode.layout != PaddleLayout::FourSided {
                return Err(EngineError::InvalidConfig(
                    "vacant seats are only supported in arena mode".to_string(),
                ));
            }
            let occupied = mode
                .layout
                .sides()
                .iter()
                .filter(|side| !self.vacant.contains(side))
                .count();
            if occupied == 0 {
                return Err(EngineError::InvalidConfig(
                    "arena needs at least one occupied seat".to_string(),
                ));
            }
        }
        Ok(mode)
    }
}
