use thiserror::Error;

use vt_agent::AgentError;
use vt_behavior::BehaviorError;
use vt_core::CoreError;
use vt_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
