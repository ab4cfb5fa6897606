use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
