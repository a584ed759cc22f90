//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::edge::EdgeDetector;
use crate::config::GameConfig;
use crate::error::GameError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start (or for a new start after reset)
    Idle,
    /// Ticks advance the ball
    Running,
    /// Ball reached the bottom; frozen until reset
    GameOver,
}

/// Travel direction along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Negative,
    Positive,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Negative => -1.0,
            Direction::Positive => 1.0,
        }
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    /// Ball bounced off the paddle
    Scored { points: u32 },
    /// Difficulty increased after a scoring bounce
    SteppedUp { velocity: f32, paddle_width: f32 },
    GameOver { points: u32 },
    Reset,
}

/// The ball. `pos` is its top-left corner in screen coordinates (y grows down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub size: f32,
    pub dir_x: Direction,
    pub dir_y: Direction,
    /// Distance travelled per tick along each axis
    pub velocity: f32,
}

impl Ball {
    /// Ball at screen center, heading down-right at base velocity
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                (config.screen_width - config.ball_size) / 2.0,
                (config.screen_height - config.ball_size) / 2.0,
            ),
            size: config.ball_size,
            dir_x: Direction::Positive,
            dir_y: Direction::Positive,
            velocity: config.base_velocity,
        }
    }

    /// Move one step and clamp into the play area
    pub fn advance(&mut self, x_max: f32, y_max: f32) {
        let step = Vec2::new(self.dir_x.sign(), self.dir_y.sign()) * self.velocity;
        self.pos = (self.pos + step).clamp(Vec2::ZERO, Vec2::new(x_max, y_max));
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge x
    pub left: f32,
    pub width: f32,
}

impl Paddle {
    /// Initial-width paddle centered horizontally
    pub fn centered(config: &GameConfig) -> Self {
        let width = config.initial_paddle_width();
        Self {
            left: (config.screen_width - width) / 2.0,
            width,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Move the left edge, keeping the whole paddle on screen at its current width
    pub fn move_to(&mut self, left: f32, screen_width: f32) {
        let max_left = (screen_width - self.width).max(0.0);
        self.left = left.clamp(0.0, max_left);
    }

    /// Narrow the paddle by `step`, staying within `[floor, ceiling]`
    pub fn shrink(&mut self, step: f32, floor: f32, ceiling: f32) {
        self.width = (self.width - step).max(floor).min(ceiling);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub points: u32,
    /// Ticks simulated since the last start
    pub ticks: u64,
    /// Watches `ball.dir_y` for the down-to-up flip that scores
    pub(crate) bounce_edge: EdgeDetector<Direction>,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let ball = Ball::centered(config);
        Self {
            phase: GamePhase::Idle,
            bounce_edge: EdgeDetector::new(ball.dir_y),
            ball,
            paddle: Paddle::centered(config),
            points: 0,
            ticks: 0,
        }
    }

    /// Idle -> Running. State is already at defaults, so nothing is reset here.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Idle, "start")?;
        self.phase = GamePhase::Running;
        self.ticks = 0;
        log::info!("Game started");
        Ok(())
    }

    /// GameOver -> Idle, restoring ball, paddle and score to their defaults
    pub fn reset(&mut self, config: &GameConfig) -> Result<(), GameError> {
        self.expect_phase(GamePhase::GameOver, "reset")?;
        *self = Self::new(config);
        log::info!("Game reset");
        Ok(())
    }

    /// Fail with `InvalidTransition` unless currently in `expected`
    pub fn expect_phase(&self, expected: GamePhase, action: &'static str) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::InvalidTransition {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Drop the ball onto a known spot; used to set up scenarios
    pub fn place_ball(&mut self, pos: Vec2, dir_x: Direction, dir_y: Direction) {
        self.ball.pos = pos;
        self.ball.dir_x = dir_x;
        self.ball.dir_y = dir_y;
        self.bounce_edge = EdgeDetector::new(dir_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::for_screen(400.0, 800.0)
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(&config());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.ball.pos, Vec2::new(190.0, 390.0));
        assert_eq!(state.ball.velocity, 3.0);
        assert_eq!(state.paddle.width, 120.0);
        assert_eq!(state.paddle.left, 140.0);
        assert_eq!(state.points, 0);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::new(&config());
        state.start().unwrap();
        assert_eq!(state.phase, GamePhase::Running);

        let err = state.start().unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidTransition { action: "start", phase: GamePhase::Running }
        ));
    }

    #[test]
    fn test_reset_only_from_game_over() {
        let config = config();
        let mut state = GameState::new(&config);
        assert!(state.reset(&config).is_err());

        state.start().unwrap();
        assert!(state.reset(&config).is_err());
        assert_eq!(state.phase, GamePhase::Running);

        state.phase = GamePhase::GameOver;
        state.points = 9;
        state.ball.velocity = 5.4;
        state.paddle.width = 100.0;
        state.paddle.left = 0.0;
        state.ball.pos = Vec2::new(10.0, 780.0);

        state.reset(&config).unwrap();
        assert_eq!(state, GameState::new(&config));
    }

    #[test]
    fn test_paddle_move_clamps_at_current_width() {
        let mut paddle = Paddle::centered(&config());
        paddle.move_to(-50.0, 400.0);
        assert_eq!(paddle.left, 0.0);

        paddle.move_to(1000.0, 400.0);
        assert_eq!(paddle.left, 280.0);

        paddle.width = 100.0;
        paddle.move_to(1000.0, 400.0);
        assert_eq!(paddle.left, 300.0);
        assert_eq!(paddle.right(), 400.0);
    }

    #[test]
    fn test_paddle_shrink_floor_and_ceiling() {
        let mut paddle = Paddle { left: 0.0, width: 120.0 };
        paddle.shrink(20.0, 100.0, 120.0);
        assert_eq!(paddle.width, 100.0);
        paddle.shrink(20.0, 100.0, 120.0);
        assert_eq!(paddle.width, 100.0);
    }

    #[test]
    fn test_ball_advance_clamps() {
        let config = config();
        let mut ball = Ball::centered(&config);
        ball.pos = Vec2::new(379.0, 1.0);
        ball.dir_y = Direction::Negative;
        ball.advance(config.x_max(), config.y_max());
        assert_eq!(ball.pos, Vec2::new(380.0, 0.0));
    }
}
