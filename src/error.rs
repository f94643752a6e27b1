// Engine error taxonomy

use std::fmt;

/// Errors surfaced to the host through the engine's control surface.
///
/// Everything the engine simulates is internal state, so the list is short:
/// a mode table entry that cannot describe a playable arena, a render target
/// that refused to attach, or a call on an engine that was already disposed.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Mode/difficulty configuration cannot produce valid geometry
    InvalidConfig(String),
    /// The host's drawable surface failed
    Surface(SurfaceError),
    /// Control call after `dispose()`
    Disposed,
}

/// Failure reported by a [`crate::engine::DrawSurface`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceError {
    pub message: String,
}

impl SurfaceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draw surface unavailable: {}", self.message)
    }
}

impl std::error::Error for SurfaceError {}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidConfig(reason) => write!(f, "invalid match configuration: {}", reason),
            EngineError::Surface(err) => err.fmt(f),
            EngineError::Disposed => write!(f, "engine has been disposed"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Surface(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurfaceError> for EngineError {
    fn from(err: SurfaceError) -> Self {
        EngineError::Surface(err)
    }
}

impl From<std::io::Error> for SurfaceError {
    fn from(err: std::io::Error) -> Self {
        SurfaceError::new(err.to_string())
    }
}
