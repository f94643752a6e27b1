// Circle-vs-rectangle overlap and impact point

use super::state::{Ball, Paddle};

/// True if the ball's circle intersects the paddle rectangle.
///
/// Uses the closest point of the rectangle to the ball center. Eliminated
/// paddles are not solid.
pub fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
    if !paddle.alive {
        return false;
    }

    let closest_x = ball.x.clamp(paddle.x, paddle.x + paddle.width);
    let closest_y = ball.y.clamp(paddle.y, paddle.y + paddle.height);
    let distance_x = ball.x - closest_x;
    let distance_y = ball.y - closest_y;

    distance_x * distance_x + distance_y * distance_y < ball.radius * ball.radius
}

/// Where along the paddle's long axis the ball struck, in `[-1, 1]`.
///
/// 0 is the paddle center, ±1 its ends (negative toward the origin). A ball
/// clipping a corner lies past the end and is clamped.
pub fn relative_impact(ball: &Ball, paddle: &Paddle) -> f32 {
    let half_length = paddle.length() / 2.0;
    debug_assert!(half_length > 0.0, "paddle length must be positive");

    let (center_x, center_y) = paddle.center();
    let offset = if paddle.side.is_vertical() {
        ball.y - center_y
    } else {
        ball.x - center_x
    };

    (offset / half_length).clamp(-1.0, 1.0)
}
