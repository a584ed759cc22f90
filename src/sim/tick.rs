//! Fixed timestep simulation tick
//!
//! One call advances the ball by one step. Velocity is expressed per tick, so
//! there is no `dt`: the scheduler owns the wall-clock rate.

use super::collision::{bottomed_out, bounce_off_walls, paddle_contact};
use super::state::{Direction, GameEvent, GamePhase, GameState};
use crate::config::GameConfig;

/// Advance the game state by one tick and return what happened.
///
/// A no-op unless the game is running.
pub fn tick(state: &mut GameState, config: &GameConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }
    state.ticks += 1;

    let ball = &mut state.ball;
    ball.advance(config.x_max(), config.y_max());

    if paddle_contact(ball, &state.paddle, config.paddle_top()) {
        ball.dir_y = Direction::Negative;
    }
    bounce_off_walls(ball, config.x_max());

    if bottomed_out(ball, config.y_max()) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks with {} points",
            state.ticks,
            state.points
        );
        events.push(GameEvent::GameOver {
            points: state.points,
        });
        return events;
    }

    if let Some((Direction::Positive, Direction::Negative)) =
        state.bounce_edge.observe(state.ball.dir_y)
    {
        award_point(state, config, &mut events);
    }

    events
}

/// Count a paddle bounce; every `step_up_every`-th point speeds the ball up
/// and narrows the paddle.
fn award_point(state: &mut GameState, config: &GameConfig, events: &mut Vec<GameEvent>) {
    state.points += 1;
    log::debug!("Paddle bounce, points = {}", state.points);
    events.push(GameEvent::Scored {
        points: state.points,
    });

    // A zero period never steps up; validated configs always have one
    if state.points.checked_rem(config.step_up_every) == Some(0) {
        state.ball.velocity += config.velocity_step;
        state.paddle.shrink(
            config.paddle_shrink_step,
            config.paddle_width_floor(),
            config.initial_paddle_width(),
        );
        log::info!(
            "Step-up at {} points: velocity {:.1}, paddle width {:.0}",
            state.points,
            state.ball.velocity,
            state.paddle.width
        );
        events.push(GameEvent::SteppedUp {
            velocity: state.ball.velocity,
            paddle_width: state.paddle.width,
        });
    }
}
