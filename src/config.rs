//! Screen geometry and gameplay tuning
//!
//! Computed once at startup from the device screen, optionally overridden by a
//! JSON file and environment variables, then validated before the first tick.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Screen size used when nothing else is configured (portrait phone)
pub const DEFAULT_SCREEN_WIDTH: f32 = 390.0;
pub const DEFAULT_SCREEN_HEIGHT: f32 = 844.0;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Status bar height; reserved twice (top and bottom) from the play area
    pub top_inset: f32,
    pub ball_size: f32,
    pub base_velocity: f32,
    /// Initial paddle width; `None` means a fixed share of the screen width
    pub paddle_width: Option<f32>,
    pub paddle_height: f32,
    pub paddle_bottom_spacing: f32,
    pub min_paddle_width: f32,
    pub velocity_step: f32,
    pub paddle_shrink_step: f32,
    /// Step-up fires every time points reach a multiple of this
    pub step_up_every: u32,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_screen(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
    }
}

impl GameConfig {
    /// Default tuning for a screen of the given size
    pub fn for_screen(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            top_inset: 0.0,
            ball_size: BALL_SIZE,
            base_velocity: BASE_VELOCITY,
            paddle_width: None,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_spacing: PADDLE_BOTTOM_SPACING,
            min_paddle_width: MIN_PADDLE_WIDTH,
            velocity_step: VELOCITY_STEP,
            paddle_shrink_step: PADDLE_SHRINK_STEP,
            step_up_every: STEP_UP_EVERY,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }

    pub fn with_top_inset(mut self, top_inset: f32) -> Self {
        self.top_inset = top_inset;
        self
    }

    /// Rightmost x the ball's left edge may occupy
    pub fn x_max(&self) -> f32 {
        self.screen_width - self.ball_size
    }

    /// Lowest y the ball's top edge may occupy; reaching it ends the game
    pub fn y_max(&self) -> f32 {
        self.screen_height - (self.top_inset * 2.0 + self.ball_size)
    }

    /// Y of the paddle's top surface
    pub fn paddle_top(&self) -> f32 {
        self.screen_height - self.paddle_bottom_spacing - self.paddle_height
    }

    pub fn initial_paddle_width(&self) -> f32 {
        // Multiply before dividing: 0.3 has no exact f32 form, 30 and 100 do
        self.paddle_width
            .unwrap_or(self.screen_width * PADDLE_WIDTH_PERCENT / 100.0)
    }

    /// Narrowest the paddle may shrink to. Never above the initial width.
    pub fn paddle_width_floor(&self) -> f32 {
        self.min_paddle_width.min(self.initial_paddle_width())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject geometry and tuning that would make the play area degenerate
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| -> Result<(), GameError> { Err(GameError::InvalidConfig(msg)) };

        let reals = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("top_inset", self.top_inset),
            ("ball_size", self.ball_size),
            ("base_velocity", self.base_velocity),
            ("paddle_width", self.initial_paddle_width()),
            ("paddle_height", self.paddle_height),
            ("paddle_bottom_spacing", self.paddle_bottom_spacing),
            ("min_paddle_width", self.min_paddle_width),
            ("velocity_step", self.velocity_step),
            ("paddle_shrink_step", self.paddle_shrink_step),
        ];
        if let Some((name, value)) = reals.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }

        if self.ball_size <= 0.0 {
            return invalid(format!("ball_size must be positive, got {}", self.ball_size));
        }
        if self.top_inset < 0.0 {
            return invalid(format!("top_inset must not be negative, got {}", self.top_inset));
        }
        if self.x_max() <= 0.0 || self.y_max() <= 0.0 {
            return invalid(format!(
                "screen {}x{} leaves no room for the ball (x_max={}, y_max={})",
                self.screen_width,
                self.screen_height,
                self.x_max(),
                self.y_max()
            ));
        }
        if self.paddle_height < 0.0 || self.paddle_bottom_spacing < 0.0 {
            return invalid("paddle height and bottom spacing must not be negative".into());
        }
        if self.paddle_top() <= 0.0 {
            return invalid(format!(
                "paddle top {} is above the screen",
                self.paddle_top()
            ));
        }
        if self.y_max() + self.ball_size < self.paddle_top() {
            return invalid(format!(
                "ball bottoms out at {} before reaching the paddle top {}",
                self.y_max() + self.ball_size,
                self.paddle_top()
            ));
        }
        let width = self.initial_paddle_width();
        if width <= 0.0 || width > self.screen_width {
            return invalid(format!(
                "paddle_width must be in (0, {}], got {width}",
                self.screen_width
            ));
        }
        if self.min_paddle_width <= 0.0 {
            return invalid(format!(
                "min_paddle_width must be positive, got {}",
                self.min_paddle_width
            ));
        }
        if self.base_velocity <= 0.0 {
            return invalid(format!(
                "base_velocity must be positive, got {}",
                self.base_velocity
            ));
        }
        if self.velocity_step <= 0.0 || self.paddle_shrink_step <= 0.0 {
            return invalid("velocity_step and paddle_shrink_step must be positive".into());
        }
        if self.step_up_every == 0 {
            return invalid("step_up_every must be at least 1".into());
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be at least 1".into());
        }
        Ok(())
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Read a JSON config file if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                log::warn!("Using default config: {e}");
                Self::default()
            }),
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Apply `SCREEN_WIDTH`, `SCREEN_HEIGHT`, `TOP_INSET` and `TICK_INTERVAL_MS`
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        fn parse<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
            let raw = raw?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    log::warn!("Invalid {key} '{raw}', ignoring");
                    None
                }
            }
        }

        if let Some(v) = parse("SCREEN_WIDTH", var("SCREEN_WIDTH")) {
            self.screen_width = v;
        }
        if let Some(v) = parse("SCREEN_HEIGHT", var("SCREEN_HEIGHT")) {
            self.screen_height = v;
        }
        if let Some(v) = parse("TOP_INSET", var("TOP_INSET")) {
            self.top_inset = v;
        }
        if let Some(v) = parse("TICK_INTERVAL_MS", var("TICK_INTERVAL_MS")) {
            self.tick_interval_ms = v;
        }
    }
}
