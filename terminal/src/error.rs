use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed score snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Malformed remaining time {body:?}: {source}")]
    RemainingTime {
        body: String,
        source: std::num::ParseIntError,
    },

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type ClientResult<T> = Result<T, ClientError>;
