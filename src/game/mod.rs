pub mod bounce;
pub mod collision;
pub mod input;
pub mod mode;
pub mod physics;
pub mod state;

pub use input::{Direction, HeldInput, Hold, InputSurface, NoInput};
pub use mode::{GameMode, MatchConfig, ModeConfig, PaddleLayout, ServeRule, WinCondition};
pub use physics::{resume_serve, start, step, FrameEvents};
pub use state::{Ball, Control, MatchState, Paddle, Phase, Score, Side};
