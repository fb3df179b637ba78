use reqwest::StatusCode;
use thiserror::Error;

/// Failure while fetching or decoding a single block.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The block's endpoint URL could not be built. Raised before any request.
    #[error("cannot build endpoint for block {id}: {reason}")]
    Endpoint { id: String, reason: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api returned {0}")]
    Status(StatusCode),

    #[error("invalid json body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A range walk reached a height below genesis. No request is made.
    #[error("no block at negative height {0}")]
    NegativeHeight(i64),
}

impl FetchError {
    /// Recoverable failures are recorded per block and the caller moves on.
    /// Anything else aborts a range walk.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FetchError::Endpoint { .. })
    }
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error(
        "step {step} cannot walk from {start} to {end}: counting up needs a positive step, counting down a negative one"
    )]
    InvalidStepDirection { start: i64, end: i64, step: i64 },

    #[error("invalid api url {0}")]
    InvalidApiUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, ChainError>;
