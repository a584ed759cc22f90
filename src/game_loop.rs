//! Fixed-rate tick scheduler around the simulation
//!
//! The state lives behind one lock shared by the ticker task and any number of
//! `PaddleInput` handles. Ticks run on a single tokio task, so they never
//! overlap; overdue ticks are skipped rather than queued.
//!
//! Every start and reset bumps a session epoch under the lock and aborts the
//! running ticker. A ticker that still wakes up afterwards sees a newer epoch
//! and exits without touching state.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Events buffered per subscriber before the oldest are dropped
const EVENT_CAPACITY: usize = 64;

struct Session {
    state: GameState,
    epoch: u64,
}

/// Owns the game state and drives it at the configured tick interval
pub struct GameLoop {
    config: Arc<GameConfig>,
    session: Arc<Mutex<Session>>,
    events: broadcast::Sender<GameEvent>,
    ticker: Option<JoinHandle<()>>,
}

impl GameLoop {
    /// Validate the config and set up an idle game
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let state = GameState::new(&config);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(Session { state, epoch: 0 })),
            events,
            ticker: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Idle -> Running, and start ticking. Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), GameError> {
        let handle = Handle::try_current().map_err(|_| GameError::NoRuntime)?;

        let epoch = {
            let mut session = self.session.lock();
            session.state.expect_phase(GamePhase::Idle, "start")?;
            session.epoch += 1;
            if let Some(ticker) = self.ticker.take() {
                ticker.abort();
            }
            session.state.start()?;
            session.epoch
        };

        let _ = self.events.send(GameEvent::Started);
        self.ticker = Some(spawn_ticker(
            &handle,
            Arc::clone(&self.session),
            Arc::clone(&self.config),
            self.events.clone(),
            epoch,
        ));
        Ok(())
    }

    /// GameOver -> Idle, restoring ball, paddle and score to their defaults
    pub fn reset(&mut self) -> Result<(), GameError> {
        {
            let mut session = self.session.lock();
            session.state.expect_phase(GamePhase::GameOver, "reset")?;
            session.epoch += 1;
            if let Some(ticker) = self.ticker.take() {
                ticker.abort();
            }
            session.state.reset(&self.config)?;
        }
        let _ = self.events.send(GameEvent::Reset);
        Ok(())
    }

    /// Run one tick immediately, outside the scheduler
    pub fn tick(&self) -> Vec<GameEvent> {
        let emitted = tick(&mut self.session.lock().state, &self.config);
        for event in &emitted {
            let _ = self.events.send(*event);
        }
        emitted
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> GameState {
        self.session.lock().state.clone()
    }

    pub fn phase(&self) -> GamePhase {
        self.session.lock().state.phase
    }

    pub fn points(&self) -> u32 {
        self.session.lock().state.points
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// A drag handler writing into this game's paddle
    pub fn paddle_input(&self) -> PaddleInput {
        PaddleInput {
            session: Arc::clone(&self.session),
            screen_width: self.config.screen_width,
            origin: None,
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

fn spawn_ticker(
    handle: &Handle,
    session: Arc<Mutex<Session>>,
    config: Arc<GameConfig>,
    events: broadcast::Sender<GameEvent>,
    epoch: u64,
) -> JoinHandle<()> {
    handle.spawn(async move {
        let mut ticker = interval(config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick completes immediately; the ball moves one interval after start
        ticker.tick().await;
        log::debug!(
            "Tick scheduler started (epoch {epoch}, every {:?})",
            config.tick_interval()
        );

        loop {
            ticker.tick().await;

            let (emitted, phase) = {
                let mut session = session.lock();
                if session.epoch != epoch {
                    log::debug!("Discarding stale tick from epoch {epoch}");
                    return;
                }
                let emitted = tick(&mut session.state, &config);
                (emitted, session.state.phase)
            };

            for event in emitted {
                let _ = events.send(event);
            }

            if phase != GamePhase::Running {
                log::debug!("Tick scheduler stopped ({phase:?})");
                return;
            }
        }
    })
}

/// Turns drag gestures into paddle positions.
///
/// A gesture starts at the paddle's current left edge; each update carries the
/// cumulative horizontal translation since then. The result is clamped with the
/// paddle width current at the time of the update.
///
/// An origin captured before a start or reset is dropped: the next update
/// measures from wherever that transition left the paddle.
pub struct PaddleInput {
    session: Arc<Mutex<Session>>,
    screen_width: f32,
    /// Session epoch and paddle left edge when the gesture began
    origin: Option<(u64, f32)>,
}

impl PaddleInput {
    pub fn begin_drag(&mut self) {
        let session = self.session.lock();
        self.origin = Some((session.epoch, session.state.paddle.left));
    }

    /// Move the paddle to the gesture origin plus `delta_x`; returns the new left edge
    pub fn set_paddle_delta(&mut self, delta_x: f32) -> f32 {
        let mut session = self.session.lock();
        let epoch = session.epoch;
        let paddle = &mut session.state.paddle;
        if !delta_x.is_finite() {
            log::warn!("Ignoring non-finite drag delta {delta_x}");
            return paddle.left;
        }
        let origin = match self.origin {
            Some((origin_epoch, left)) if origin_epoch == epoch => left,
            _ => {
                self.origin = Some((epoch, paddle.left));
                paddle.left
            }
        };
        paddle.move_to(origin + delta_x, self.screen_width);
        paddle.left
    }

    pub fn end_drag(&mut self) {
        self.origin = None;
    }
}
