// Bot trait for AI opponents

use std::fmt;

use crate::game::{Ball, Paddle};

/// Trait for AI paddle controllers
///
/// A bot only reads the ball and its own paddle; the match state machine
/// applies the returned displacement and clamps it to the arena.
pub trait Bot: fmt::Debug {
    /// Decide how far to move the paddle this frame
    ///
    /// # Arguments
    /// * `paddle` - The paddle under this bot's control
    /// * `ball` - Current ball position and velocity
    /// * `max_speed` - Paddle speed limit for the current mode
    ///
    /// # Returns
    /// Signed displacement along the paddle's axis of motion, never larger
    /// than `max_speed` in magnitude; `0.0` to stay put.
    fn steer(&mut self, paddle: &Paddle, ball: &Ball, max_speed: f32) -> f32;

    /// Reset bot internal state (called on every serve)
    fn reset(&mut self);

    /// Bot name for debugging/display
    fn name(&self) -> &str;
}
