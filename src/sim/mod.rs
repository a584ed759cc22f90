//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per call, velocity measured per tick
//! - No clocks, threads or I/O
//! - No rendering or platform dependencies

pub mod collision;
pub mod edge;
pub mod state;
pub mod tick;

pub use collision::{bottomed_out, bounce_off_walls, paddle_contact};
pub use edge::EdgeDetector;
pub use state::{Ball, Direction, GameEvent, GamePhase, GameState, Paddle};
pub use tick::tick;
