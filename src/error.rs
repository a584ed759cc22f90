use crate::sim::GamePhase;

/// Errors surfaced by configuration and phase transitions
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: GamePhase,
    },
    #[error("no tokio runtime to run the tick scheduler on")]
    NoRuntime,
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
