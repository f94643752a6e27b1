// Paddle bounce: deflection angle, acceleration and spin

use super::collision::relative_impact;
use super::state::{Ball, Paddle, Side};
use crate::config::PhysicsConfig;

// Below this the rescale would be float noise from cos/sin recomposition
const SPEED_EPSILON: f32 = 1e-4;

/// Send the ball back off `paddle`.
///
/// The hit position picks the deflection (center → straight back, ends →
/// `max_bounce_angle`), speed grows by the acceleration factor up to the cap,
/// and the paddle's own velocity this frame is added along the paddle axis.
/// Vertical paddles reflect on x, horizontal paddles on y.
///
/// The ball is then placed flush against the paddle face so the next frame
/// cannot detect the same contact again.
pub fn bounce(ball: &mut Ball, paddle: &Paddle, physics: &PhysicsConfig) {
    let impact = relative_impact(ball, paddle);
    let angle = impact * physics.max_bounce_angle();

    let speed = (ball.speed() * physics.acceleration_factor).min(physics.max_ball_speed);

    let perpendicular = speed * angle.cos() * outward(paddle.side);
    let parallel = speed * angle.sin() + paddle.velocity * physics.paddle_influence;

    let (dx, dy) = if paddle.side.is_vertical() {
        (perpendicular, parallel)
    } else {
        (parallel, perpendicular)
    };
    let (dx, dy) = keep_speed_in_band(dx, dy, speed, physics.max_ball_speed);
    ball.dx = dx;
    ball.dy = dy;

    match paddle.side {
        Side::Left => ball.x = paddle.x + paddle.width + ball.radius,
        Side::Right => ball.x = paddle.x - ball.radius,
        Side::Top => ball.y = paddle.y + paddle.height + ball.radius,
        Side::Bottom => ball.y = paddle.y - ball.radius,
    }
}

/// Sign of the velocity component pointing away from the paddle's wall
fn outward(side: Side) -> f32 {
    match side {
        Side::Left | Side::Top => 1.0,
        Side::Right | Side::Bottom => -1.0,
    }
}

/// Spin can push the composed vector above the cap or, when it opposes the
/// deflection, below the rally's current speed. Rescale into
/// `[floor, cap]` so speed stays non-decreasing and bounded.
fn keep_speed_in_band(dx: f32, dy: f32, floor: f32, cap: f32) -> (f32, f32) {
    let magnitude = (dx * dx + dy * dy).sqrt();
    if magnitude <= f32::EPSILON {
        return (dx, dy);
    }

    let target = if magnitude > cap + SPEED_EPSILON {
        cap
    } else if magnitude < floor - SPEED_EPSILON {
        floor
    } else {
        return (dx, dy);
    };

    let scale = target / magnitude;
    (dx * scale, dy * scale)
}
