use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("icon {0} not found")]
    NotFound(String),
}
