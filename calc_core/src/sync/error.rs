use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while talking to the arithmetic service
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't reach the server or read its response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server refused the request (4xx). The message comes straight from
    /// the server, e.g. `division by zero`.
    #[error("{0}")]
    Client(String),

    /// The server had a problem of its own (5xx).
    #[error("the server had an internal error")]
    Server,

    /// The server returned something we didn't expect, like a redirect.
    #[error("unexpected response status {0}")]
    Unexpected(reqwest::StatusCode),
}

/// The body of any error response from the server.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResp {
    /// What went wrong, suitable for showing to a human
    pub error: String,
}
