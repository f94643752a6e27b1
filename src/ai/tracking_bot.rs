// Dead-zone tracker: the paddle center chases the ball coordinate

use super::{Bot, Difficulty};
use crate::game::{Ball, Paddle};

/// Bot that keeps its paddle centered on the ball.
///
/// Imperfection comes only from the dead zone: while the gap to the target
/// is within `error_margin` the paddle does not move at all, so on Easy it
/// reacts late and often too little. With a zero margin it tracks perfectly,
/// limited only by paddle speed.
#[derive(Debug, Clone)]
pub struct TrackingBot {
    name: String,
    error_margin: f32,
}

impl TrackingBot {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            name: difficulty.display_name().to_string(),
            error_margin: difficulty.error_margin(),
        }
    }
}

impl Bot for TrackingBot {
    fn steer(&mut self, paddle: &Paddle, ball: &Ball, max_speed: f32) -> f32 {
        let ball_coord = if paddle.side.is_vertical() { ball.y } else { ball.x };
        let target = ball_coord - paddle.length() / 2.0;
        let delta = target - paddle.position();

        if delta.abs() <= self.error_margin {
            return 0.0;
        }

        // Never overshoot the target
        delta.signum() * max_speed.min(delta.abs())
    }

    fn reset(&mut self) {
        // Tracker has no state to reset
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Control, Side};

    fn paddle_at(y: f32) -> Paddle {
        Paddle {
            side: Side::Right,
            x: 780.0,
            y,
            width: 10.0,
            height: 100.0,
            alive: true,
            velocity: 0.0,
            control: Control::Ai,
        }
    }

    fn ball_at_y(y: f32) -> Ball {
        Ball {
            x: 600.0,
            y,
            dx: 5.0,
            dy: 0.0,
            radius: 10.0,
        }
    }

    #[test]
    fn test_within_margin_does_not_move() {
        let mut bot = TrackingBot::new(Difficulty::Easy);
        // target = 400 - 50 = 350, paddle at 300 → delta 50 <= 70
        assert_eq!(bot.steer(&paddle_at(300.0), &ball_at_y(400.0), 8.0), 0.0);
        // exactly on the margin still holds still
        assert_eq!(bot.steer(&paddle_at(280.0), &ball_at_y(400.0), 8.0), 0.0);
    }

    #[test]
    fn test_outside_margin_moves_at_paddle_speed() {
        let mut bot = TrackingBot::new(Difficulty::Hard);
        assert_eq!(bot.steer(&paddle_at(100.0), &ball_at_y(400.0), 8.0), 8.0);
        assert_eq!(bot.steer(&paddle_at(400.0), &ball_at_y(100.0), 8.0), -8.0);
    }

    #[test]
    fn test_impossible_never_overshoots() {
        let mut bot = TrackingBot::new(Difficulty::Impossible);
        // target 350, paddle 347 → move exactly 3
        assert_eq!(bot.steer(&paddle_at(347.0), &ball_at_y(400.0), 8.0), 3.0);
        assert_eq!(bot.steer(&paddle_at(350.0), &ball_at_y(400.0), 8.0), 0.0);
    }

    #[test]
    fn test_horizontal_paddle_tracks_x() {
        let mut bot = TrackingBot::new(Difficulty::Impossible);
        let paddle = Paddle {
            side: Side::Top,
            x: 360.0,
            y: 10.0,
            width: 80.0,
            height: 10.0,
            ..paddle_at(0.0)
        };
        // ball.x 600 → target 560, delta 200
        assert_eq!(bot.steer(&paddle, &ball_at_y(400.0), 7.0), 7.0);
    }
}
