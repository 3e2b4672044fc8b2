use axum::{
    body::to_bytes,
    extract::rejection::JsonRejection,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use calc_core::sync::error::ErrorResp;

/// An error from the API
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Something went wrong which we should log but not expose to clients.
    Internal,

    /// Some handler-specific error
    Custom(StatusCode, String),
}

/// Return an error from a handler-specific error type.
#[macro_export]
macro_rules! bail {
    ($message:expr) => {
        return Err($crate::error::Error::custom($message))
    };
    ($message:expr, $status:expr) => {
        return Err($crate::error::Error::custom_with_status($message, $status))
    };
}

/// `bail!` conditionally.
#[macro_export]
macro_rules! bail_if {
    ($cond:expr, $message:expr) => {
        if $cond {
            $crate::bail!($message);
        }
    };
    ($cond:expr, $message:expr, $status:expr) => {
        if $cond {
            $crate::bail!($message, $status);
        }
    };
}

impl Error {
    /// Construct a custom error
    pub fn custom(message: &str) -> Self {
        Self::custom_with_status(message, StatusCode::BAD_REQUEST)
    }

    /// Construct a custom error with a specific status code
    pub fn custom_with_status(message: &str, status: StatusCode) -> Self {
        Self::Custom(status, message.to_string())
    }

    /// Unwrap a handler-specific error
    #[cfg(test)]
    pub fn unwrap_custom(self) -> (StatusCode, String) {
        match self {
            Self::Custom(status_code, message) => (status_code, message),
            Self::Internal => panic!("called `Error::unwrap_custom` on an `Internal`"),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(?rejection, "rejected request body");
        Self::custom_with_status(&rejection.body_text(), rejection.status())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::Custom(status_code, message) => (status_code, message),
        };

        (status, Json(ErrorResp { error })).into_response()
    }
}

/// How much of a non-JSON error body we're willing to read when rewriting it.
const MAX_ERROR_BODY: usize = 4096;

/// Rewrite error responses that didn't come from our handlers (body limits,
/// timeouts, wrong methods) so that every error has an `{"error": …}` body.
pub async fn json_errors(response: Response) -> Response {
    let status = response.status();

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));

    if is_json || !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let body = to_bytes(response.into_body(), MAX_ERROR_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let message = if status == StatusCode::REQUEST_TIMEOUT && body.is_empty() {
        "request timed out".to_string()
    } else if body.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| status.to_string(), str::to_lowercase)
    } else {
        body
    };

    tracing::debug!(%status, %message, "rewrote error body as JSON");

    Error::custom_with_status(&message, status).into_response()
}
