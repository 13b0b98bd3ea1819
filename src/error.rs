use reqwest::StatusCode;
use thiserror::Error;

/// Failure to retrieve a remote page or image.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(StatusCode),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Reasons a downloaded image was not stored.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The payload is too small to be a real image; most likely an
    /// error page or a tracking pixel.
    #[error("payload of {len} bytes is not above the {min} byte threshold")]
    TooSmall { len: usize, min: usize },
    #[error("could not write image: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Local filesystem errors end the run, everything else is a miss.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DownloadError::Io(_))
    }
}

/// Failures talking to the storefront's admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("login response carries no token")]
    MissingToken,
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
