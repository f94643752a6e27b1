use std::f32::consts::{PI, TAU};

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mode::{MatchConfig, ModeConfig, ServeRule, WinCondition};
use crate::ai::{self, Bot, Difficulty};
use crate::error::EngineError;

/// Arena edge owning a paddle.
///
/// The declaration order is the canonical collision order: when the ball
/// overlaps several paddles in the same frame only the first is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Top => 2,
            Side::Bottom => 3,
        }
    }

    /// Left/right paddles stand upright and slide along y
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    /// Player number as shown on the scoreboard (1-based)
    pub fn player_number(self) -> usize {
        self.index() + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            radius,
        }
    }

    pub fn reset(&mut self, x: f32, y: f32, angle: f32, speed: f32) {
        self.x = x;
        self.y = y;
        self.dx = angle.cos() * speed;
        self.dy = angle.sin() * speed;
    }

    pub fn speed(&self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Human,
    Ai,
}

/// Axis-aligned paddle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    /// Displacement applied this frame along the axis of motion (spin source)
    pub velocity: f32,
    pub control: Control,
}

impl Paddle {
    /// Place a paddle centered on its edge, one thickness in from the wall
    pub fn new(side: Side, mode: &ModeConfig, control: Control) -> Self {
        let thickness = mode.physics.paddle_thickness;
        let length = mode.paddle_length;
        let (x, y, width, height) = match side {
            Side::Left => (thickness, (mode.arena_height - length) / 2.0, thickness, length),
            Side::Right => (
                mode.arena_width - thickness * 2.0,
                (mode.arena_height - length) / 2.0,
                thickness,
                length,
            ),
            Side::Top => ((mode.arena_width - length) / 2.0, thickness, length, thickness),
            Side::Bottom => (
                (mode.arena_width - length) / 2.0,
                mode.arena_height - thickness * 2.0,
                length,
                thickness,
            ),
        };
        debug_assert!(length > 0.0, "paddle length must be positive");

        Self {
            side,
            x,
            y,
            width,
            height,
            alive: true,
            velocity: 0.0,
            control,
        }
    }

    pub fn length(&self) -> f32 {
        if self.side.is_vertical() {
            self.height
        } else {
            self.width
        }
    }

    /// Coordinate along the axis of motion
    pub fn position(&self) -> f32 {
        if self.side.is_vertical() {
            self.y
        } else {
            self.x
        }
    }

    pub fn set_position(&mut self, pos: f32) {
        if self.side.is_vertical() {
            self.y = pos;
        } else {
            self.x = pos;
        }
    }

    /// Move along the axis of motion and clamp to `[0, extent - length]`
    pub fn slide(&mut self, delta: f32, extent: f32) {
        let pos = (self.position() + delta).clamp(0.0, extent - self.length());
        self.set_position(pos);
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Classic points or arena lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Score {
    Classic { left: u32, right: u32, target: u32 },
    Arena { lives: [u32; 4] },
}

impl Score {
    fn new(win: WinCondition, vacant: &[Side]) -> Self {
        match win {
            WinCondition::Points(target) => Score::Classic {
                left: 0,
                right: 0,
                target,
            },
            WinCondition::Lives(start) => {
                let mut lives = [start; 4];
                for side in vacant {
                    lives[side.index()] = 0;
                }
                Score::Arena { lives }
            }
        }
    }

    pub fn points(&self, side: Side) -> Option<u32> {
        match (self, side) {
            (Score::Classic { left, .. }, Side::Left) => Some(*left),
            (Score::Classic { right, .. }, Side::Right) => Some(*right),
            _ => None,
        }
    }

    pub fn lives(&self, side: Side) -> Option<u32> {
        match self {
            Score::Arena { lives } => Some(lives[side.index()]),
            Score::Classic { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Waiting for start; nothing is simulated
    Menu,
    Playing,
    /// Serve pause after a point: ball frozen, paddles still move
    Scored,
    /// Terminal until the next reset
    GameOver,
}

/// Owned state of one match.
///
/// Created by [`MatchState::new`] and replaced wholesale by
/// [`MatchState::reset`]; the epoch survives resets and is bumped by every
/// one, so deferred transitions scheduled against an older match are ignored.
#[derive(Debug)]
pub struct MatchState {
    pub mode: ModeConfig,
    pub difficulty: Difficulty,
    pub ball: Ball,
    /// Canonical side order; two entries in classic modes, four in arena
    pub paddles: Vec<Paddle>,
    pub score: Score,
    pub phase: Phase,
    pub winner: Option<Side>,
    pub(crate) bots: Vec<(Side, Box<dyn Bot>)>,
    pub(crate) rng: StdRng,
    epoch: u64,
}

impl MatchState {
    pub fn new(config: &MatchConfig, rng: StdRng) -> Result<Self, EngineError> {
        let mode = config.resolve()?;
        let (ball, paddles, bots) = build_entities(&mode, config);

        Ok(Self {
            score: Score::new(mode.win, &config.vacant),
            difficulty: config.difficulty,
            mode,
            ball,
            paddles,
            phase: Phase::Menu,
            winner: None,
            bots,
            rng,
            epoch: 0,
        })
    }

    /// Rebuild every entity from `config` and return to `Menu`.
    ///
    /// The RNG stream carries over; the configuration is validated before
    /// anything is replaced, so a rejected config leaves the old match intact.
    pub fn reset(&mut self, config: &MatchConfig) -> Result<(), EngineError> {
        let mode = config.resolve()?;
        let (ball, paddles, bots) = build_entities(&mode, config);

        self.score = Score::new(mode.win, &config.vacant);
        self.difficulty = config.difficulty;
        self.mode = mode;
        self.ball = ball;
        self.paddles = paddles;
        self.bots = bots;
        self.phase = Phase::Menu;
        self.winner = None;
        self.epoch += 1;
        Ok(())
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Invalidate pending deferred transitions without touching entities
    pub(crate) fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    pub fn paddle(&self, side: Side) -> Option<&Paddle> {
        self.paddles.iter().find(|p| p.side == side)
    }

    pub fn paddle_mut(&mut self, side: Side) -> Option<&mut Paddle> {
        self.paddles.iter_mut().find(|p| p.side == side)
    }

    pub fn alive_sides(&self) -> Vec<Side> {
        self.paddles.iter().filter(|p| p.alive).map(|p| p.side).collect()
    }

    /// Center ball and paddles and launch a fresh serve
    pub(crate) fn serve(&mut self) {
        let angle = match self.mode.serve {
            ServeRule::Horizontal { max_angle } => {
                let angle = self.rng.gen_range(-max_angle..=max_angle);
                if self.rng.gen_bool(0.5) {
                    angle + PI
                } else {
                    angle
                }
            }
            ServeRule::AnyDirection => self.rng.gen_range(0.0..TAU),
        };

        self.ball.reset(
            self.mode.arena_width / 2.0,
            self.mode.arena_height / 2.0,
            angle,
            self.mode.physics.ball_initial_speed,
        );
        self.center_paddles();

        for (_, bot) in self.bots.iter_mut() {
            bot.reset();
        }
    }

    fn center_paddles(&mut self) {
        for paddle in self.paddles.iter_mut() {
            let extent = self.mode.travel_extent(paddle.side);
            paddle.set_position((extent - paddle.length()) / 2.0);
            paddle.velocity = 0.0;
        }
    }
}

type Entities = (Ball, Vec<Paddle>, Vec<(Side, Box<dyn Bot>)>);

fn build_entities(mode: &ModeConfig, config: &MatchConfig) -> Entities {
    let ball = Ball::new(
        mode.arena_width / 2.0,
        mode.arena_height / 2.0,
        mode.physics.ball_radius,
    );

    let mut paddles = Vec::with_capacity(mode.layout.sides().len());
    let mut bots: Vec<(Side, Box<dyn Bot>)> = Vec::new();
    for &side in mode.layout.sides() {
        let control = if mode.mode.is_ai_seat(side) {
            bots.push((side, ai::create_bot(config.difficulty)));
            Control::Ai
        } else {
            Control::Human
        };
        let mut paddle = Paddle::new(side, mode, control);
        paddle.alive = !config.vacant.contains(&side);
        paddles.push(paddle);
    }

    (ball, paddles, bots)
}
