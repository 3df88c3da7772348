use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("invalid decision weights: {0}")]
    Weights(#[from] rand::distributions::WeightedError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
