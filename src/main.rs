//! Paddle Bounce entry point
//!
//! Runs one headless game with the autopilot on the paddle and prints the final
//! score.
//!
//! Usage: `paddle-bounce [CONFIG_JSON] [SEED]`

use std::path::PathBuf;

use tokio::sync::broadcast::error::RecvError;
use tokio::time::{MissedTickBehavior, interval};

use paddle_bounce::sim::GameEvent;
use paddle_bounce::{Autopilot, GameConfig, GameLoop};

const DEFAULT_SEED: u64 = 7;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Paddle Bounce v{} (headless)", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let seed = args
        .next()
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(DEFAULT_SEED);

    let mut config = GameConfig::load_or_default(config_path.as_deref());
    config.apply_env();
    log::info!(
        "Screen {}x{}, tick every {} ms, seed {}",
        config.screen_width,
        config.screen_height,
        config.tick_interval_ms,
        seed
    );

    let mut game = GameLoop::new(config)?;
    let mut events = game.subscribe();
    let mut input = game.paddle_input();
    let mut pilot = Autopilot::new(seed);

    game.start()?;
    input.begin_drag();
    pilot.begin(&game.snapshot());

    // Input frames run alongside the tick scheduler, like touch updates would
    let mut frame = interval(game.config().tick_interval());
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let points = loop {
        tokio::select! {
            _ = frame.tick() => {
                let delta = pilot.next_delta(&game.snapshot());
                input.set_paddle_delta(delta);
            }
            event = events.recv() => match event {
                Ok(GameEvent::GameOver { points }) => break points,
                Ok(GameEvent::Scored { points }) => log::info!("Score: {points}"),
                Ok(GameEvent::SteppedUp { velocity, paddle_width }) => {
                    log::info!("Faster! velocity {velocity:.1}, paddle {paddle_width:.0}")
                }
                Ok(event) => log::debug!("{event:?}"),
                Err(RecvError::Lagged(missed)) => log::warn!("Missed {missed} game events"),
                Err(RecvError::Closed) => break game.points(),
            },
        }
    };
    input.end_drag();

    println!("Game over! Final score: {points}");
    Ok(())
}
