//! Host-facing surfaces: what the engine draws to and whom it notifies.

use crate::ai::Difficulty;
use crate::error::SurfaceError;
use crate::game::{Ball, GameMode, Paddle, Phase, Score, Side};

/// Arena dimensions handed to the surface when a match is (re)built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaSize {
    pub width: f32,
    pub height: f32,
}

/// Everything needed to render one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    pub arena: ArenaSize,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub paused: bool,
    pub paddles: &'a [Paddle],
    /// `None` while the ball is not in play (menu, game over)
    pub ball: Option<&'a Ball>,
    pub score: &'a Score,
    pub winner: Option<Side>,
}

/// Render target supplied by the host.
///
/// The engine has no rendering opinion; a canvas, a terminal or a test
/// recorder all work.
pub trait DrawSurface {
    /// Called once at construction and after every reset. An error here
    /// means the engine has nothing to draw on and refuses to run.
    fn prepare(&mut self, arena: ArenaSize) -> Result<(), SurfaceError>;

    /// Called once per tick, after the simulation step.
    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SurfaceError>;
}

/// Lifecycle callbacks; every method defaults to a no-op.
pub trait MatchObserver {
    fn on_score_changed(&mut self, _score: &Score) {}

    /// `winner` is `None` only if every remaining player was knocked out on
    /// the same point.
    fn on_match_ended(&mut self, _winner: Option<Side>) {}

    fn on_phase_changed(&mut self, _phase: Phase) {}

    /// The ball came off a live paddle
    fn on_paddle_hit(&mut self, _side: Side) {}

    /// The ball bounced off a wall that cannot score
    fn on_wall_bounce(&mut self) {}

    /// An arena player lost their last life
    fn on_player_eliminated(&mut self, _side: Side) {}
}

/// Observer that ignores everything
pub struct NullObserver;

impl MatchObserver for NullObserver {}

/// Surface that draws nothing; useful for headless simulation
pub struct HeadlessSurface;

impl DrawSurface for HeadlessSurface {
    fn prepare(&mut self, _arena: ArenaSize) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn draw(&mut self, _frame: &FrameView<'_>) -> Result<(), SurfaceError> {
        Ok(())
    }
}
