//! Collision tests between the ball, the paddle and the screen edges
//!
//! All tests run on positions already clamped into the play area, so a ball
//! that overshoots a wall sits exactly on it and the threshold checks below
//! behave like exact boundary hits.

use super::state::{Ball, Direction, Paddle};

/// Whether the ball is touching the paddle this tick.
///
/// The horizontal span is deliberately lopsided: the ball counts as over the
/// paddle while its right edge is past the paddle's left edge, or while its
/// left edge is within one ball size past the paddle's right edge.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, paddle_top: f32) -> bool {
    ball.bottom() >= paddle_top
        && ball.pos.x + ball.size >= paddle.left
        && ball.pos.x - ball.size <= paddle.right()
}

/// Reverse direction on any wall the ball is resting against.
/// The bottom edge is not a wall; reaching it ends the game.
pub fn bounce_off_walls(ball: &mut Ball, x_max: f32) {
    if ball.pos.x >= x_max {
        ball.dir_x = Direction::Negative;
    }
    if ball.pos.y <= 0.0 {
        ball.dir_y = Direction::Positive;
    }
    if ball.pos.x <= 0.0 {
        ball.dir_x = Direction::Positive;
    }
}

/// Whether the ball has dropped past the paddle to the bottom boundary
pub fn bottomed_out(ball: &Ball, y_max: f32) -> bool {
    ball.pos.y >= y_max
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            size: 20.0,
            dir_x: Direction::Positive,
            dir_y: Direction::Positive,
            velocity: 3.0,
        }
    }

    #[test]
    fn test_paddle_contact_requires_vertical_reach() {
        let paddle = Paddle { left: 140.0, width: 120.0 };
        // Bottom edge at 695, paddle top at 696
        assert!(!paddle_contact(&ball_at(190.0, 675.0), &paddle, 696.0));
        assert!(paddle_contact(&ball_at(190.0, 676.0), &paddle, 696.0));
    }

    #[test]
    fn test_paddle_contact_horizontal_span_is_lopsided() {
        let paddle = Paddle { left: 140.0, width: 120.0 };
        let y = 680.0;

        // Left side: ball's right edge must reach the paddle
        assert!(paddle_contact(&ball_at(120.0, y), &paddle, 696.0));
        assert!(!paddle_contact(&ball_at(119.0, y), &paddle, 696.0));

        // Right side: one extra ball size of slack past the right edge
        assert!(paddle_contact(&ball_at(280.0, y), &paddle, 696.0));
        assert!(!paddle_contact(&ball_at(281.0, y), &paddle, 696.0));
    }

    #[test]
    fn test_bounce_off_walls() {
        let mut ball = ball_at(380.0, 100.0);
        bounce_off_walls(&mut ball, 380.0);
        assert_eq!(ball.dir_x, Direction::Negative);
        assert_eq!(ball.dir_y, Direction::Positive);

        let mut ball = ball_at(0.0, 0.0);
        ball.dir_x = Direction::Negative;
        ball.dir_y = Direction::Negative;
        bounce_off_walls(&mut ball, 380.0);
        assert_eq!(ball.dir_x, Direction::Positive);
        assert_eq!(ball.dir_y, Direction::Positive);

        let mut ball = ball_at(200.0, 300.0);
        ball.dir_x = Direction::Negative;
        bounce_off_walls(&mut ball, 380.0);
        assert_eq!(ball.dir_x, Direction::Negative);
    }

    #[test]
    fn test_bottomed_out() {
        assert!(!bottomed_out(&ball_at(10.0, 779.0), 780.0));
        assert!(bottomed_out(&ball_at(10.0, 780.0), 780.0));
    }
}
