use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("dialogue library must contain at least one script")]
    EmptyLibrary,

    #[error("dialogue script {0} has no lines")]
    EmptyScript(usize),

    #[error("dialogue library holds {0} scripts, more than a ScriptId can address")]
    TooManyScripts(usize),

    #[error("name pool must contain at least one name")]
    EmptyNamePool,

    #[error("no walkable tile to spawn on")]
    NoWalkableTile,
}

pub type AgentResult<T> = Result<T, AgentError>;
