pub mod hud;
pub mod input;
pub mod overlay;
pub mod render;

pub use hud::{BracketStatus, Hud, KeyHints};
pub use input::{Command, KeyLatch};
pub use overlay::{overlay_for, OverlayMessage, OverlayStyle};
pub use render::{render, Palette, TerminalSurface};
