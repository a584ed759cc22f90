//! Paddle Bounce - a single-screen ball and paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, paddle contact, scoring)
//! - `game_loop`: Fixed-rate tick scheduler and shared state
//! - `config`: Screen-derived geometry and gameplay tuning
//! - `autopilot`: Seeded paddle controller for demo mode

pub mod autopilot;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod sim;

pub use autopilot::Autopilot;
pub use config::GameConfig;
pub use error::GameError;
pub use game_loop::{GameLoop, PaddleInput};

/// Game configuration constants
pub mod consts {
    /// Ball edge length (the ball is drawn as a circle inscribed in this square)
    pub const BALL_SIZE: f32 = 20.0;
    /// Distance the ball travels per tick along each axis
    pub const BASE_VELOCITY: f32 = 3.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH_PERCENT: f32 = 30.0; // of screen width
    pub const PADDLE_HEIGHT: f32 = 24.0;
    pub const PADDLE_BOTTOM_SPACING: f32 = 80.0;

    /// Difficulty step-up
    pub const STEP_UP_EVERY: u32 = 4;
    pub const VELOCITY_STEP: f32 = 1.2;
    pub const PADDLE_SHRINK_STEP: f32 = 20.0;
    pub const MIN_PADDLE_WIDTH: f32 = 100.0;

    /// Tick interval (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;
}
