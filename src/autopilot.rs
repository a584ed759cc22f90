//! Demo mode - a computer player for the paddle
//!
//! Follows the ball with a capped paddle speed and a deliberate aim error that
//! is re-rolled after every scored bounce, so runs differ per seed but are
//! reproducible for a given one. Once the ball outpaces the paddle the
//! autopilot starts missing.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::GameState;

/// Default paddle speed (pixels per input frame)
pub const DEFAULT_MAX_SPEED: f32 = 6.0;
/// Default aim error as a fraction of half the paddle width
pub const DEFAULT_MAX_AIM_ERROR: f32 = 0.8;

pub struct Autopilot {
    rng: Pcg32,
    max_speed: f32,
    max_aim_error: f32,
    /// Offset from the ball center the paddle center aims for
    aim_error: f32,
    last_points: Option<u32>,
    /// Paddle left edge when the current drag began
    origin: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            max_speed: DEFAULT_MAX_SPEED,
            max_aim_error: DEFAULT_MAX_AIM_ERROR,
            aim_error: 0.0,
            last_points: None,
            origin: 0.0,
        }
    }

    pub fn with_skill(mut self, max_speed: f32, max_aim_error: f32) -> Self {
        self.max_speed = max_speed.max(0.0);
        self.max_aim_error = max_aim_error.abs();
        self
    }

    /// Start a drag from wherever the paddle is now
    pub fn begin(&mut self, state: &GameState) {
        self.origin = state.paddle.left;
    }

    /// Cumulative drag delta for this frame, relative to the drag origin
    pub fn next_delta(&mut self, state: &GameState) -> f32 {
        let paddle = &state.paddle;
        if self.last_points != Some(state.points) {
            self.last_points = Some(state.points);
            let half_width = paddle.width / 2.0;
            let max_error = self.max_aim_error * half_width;
            self.aim_error = self.rng.random_range(-max_error..=max_error);
        }

        let ball_center = state.ball.pos.x + state.ball.size / 2.0;
        let target_left = ball_center + self.aim_error - paddle.width / 2.0;
        let step = (target_left - paddle.left).clamp(-self.max_speed, self.max_speed);
        paddle.left + step - self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{GamePhase, tick};

    /// Play headlessly, feeding the autopilot straight into the paddle
    fn play(pilot: &mut Autopilot, config: &GameConfig, max_ticks: usize) -> GameState {
        let mut state = GameState::new(config);
        state.start().unwrap();
        pilot.begin(&state);
        for _ in 0..max_ticks {
            let delta = pilot.next_delta(&state);
            let origin = pilot.origin;
            state.paddle.move_to(origin + delta, config.screen_width);
            tick(&mut state, config);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        state
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = GameConfig::for_screen(400.0, 800.0);
        let a = play(&mut Autopilot::new(42), &config, 5_000);
        let b = play(&mut Autopilot::new(42), &config, 5_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_perfect_aim_keeps_rallying() {
        let config = GameConfig::for_screen(400.0, 800.0);
        let mut pilot = Autopilot::new(1).with_skill(8.0, 0.0);
        let state = play(&mut pilot, &config, 4_000);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.points >= 8, "points = {}", state.points);
        assert_eq!(state.paddle.width, 100.0);
    }

    #[test]
    fn test_frozen_paddle_loses() {
        let config = GameConfig::for_screen(400.0, 800.0);
        let mut pilot = Autopilot::new(1).with_skill(0.0, 0.0);
        let state = play(&mut pilot, &config, 5_000);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_step_is_capped() {
        let config = GameConfig::for_screen(400.0, 800.0);
        let mut state = GameState::new(&config);
        state.ball.pos.x = 0.0;
        let mut pilot = Autopilot::new(3).with_skill(5.0, 0.0);
        pilot.begin(&state);
        assert_eq!(pilot.next_delta(&state), -5.0);
    }
}
