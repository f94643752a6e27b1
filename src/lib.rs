//! Pong match engine: classic one- and two-player matches and a four-player
//! arena, driven one frame at a time by a host.

pub mod ai;
pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod game;
pub mod tournament;
pub mod ui;

pub use engine::{DrawSurface, Engine, FrameView, MatchObserver, MatchRecord};
pub use error::{EngineError, SurfaceError};
pub use game::{GameMode, MatchConfig, Phase, Side};
